pub const DEFAULT_SLOTS: usize = 1 << 16;

// Rehash once occupancy passes 3/4 of the slots, so probe chains stay
// short and can never wrap a full table.
const MAX_LOAD_NUM: usize = 3;
const MAX_LOAD_DEN: usize = 4;

/// Running statistics for one station. `count` is always at least 1; the
/// mean is derived from `sum` at read time rather than stored.
#[derive(Debug, Clone, PartialEq)]
pub struct StationStats {
    pub name: Box<str>,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub count: u64,
}

impl StationStats {
    fn new(name: &str, value: f64) -> Self {
        Self {
            name: name.into(),
            min: value,
            max: value,
            sum: value,
            count: 1,
        }
    }

    fn fold(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.sum += value;
        self.count += 1;
    }

    pub fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

#[derive(Debug, Clone)]
struct Slot {
    hash: u64,
    stats: StationStats,
}

/// Open-addressed, linear-probing map from station name to [`StationStats`].
///
/// Lookup starts at `hash(name) & mask` and advances one slot at a time
/// (wrapping) until it hits an equal key or an empty slot.
pub struct Table {
    slots: Vec<Option<Slot>>,
    len: usize,
}

/// Polynomial name hash, `h = 31*h + byte` over the name bytes. Deterministic
/// and order-sensitive; the same name always lands in the same bucket for a
/// given slot count.
#[inline]
pub fn hash(name: &[u8]) -> u64 {
    let mut h: u64 = 0;
    for &b in name {
        h = h.wrapping_mul(31).wrapping_add(b as u64);
    }
    h
}

impl Table {
    /// `slots` is rounded up to a power of two.
    pub fn new(slots: usize) -> Self {
        let slots = slots.next_power_of_two().max(8);
        Self {
            slots: vec![None; slots],
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Folds `value` into the entry for `name`, inserting it on first sight.
    pub fn upsert(&mut self, name: &str, value: f64) {
        if (self.len + 1) * MAX_LOAD_DEN > self.slots.len() * MAX_LOAD_NUM {
            self.grow();
        }

        let mask = self.slots.len() - 1;
        let h = hash(name.as_bytes());
        let mut i = h as usize & mask;

        loop {
            match &mut self.slots[i] {
                Some(slot) if slot.hash == h && &*slot.stats.name == name => {
                    slot.stats.fold(value);
                    return;
                }
                Some(_) => i = (i + 1) & mask,
                empty @ None => {
                    *empty = Some(Slot {
                        hash: h,
                        stats: StationStats::new(name, value),
                    });
                    self.len += 1;
                    return;
                }
            }
        }
    }

    fn grow(&mut self) {
        let new_len = self.slots.len() * 2;
        let old = std::mem::replace(&mut self.slots, vec![None; new_len]);
        let mask = new_len - 1;

        for slot in old.into_iter().flatten() {
            let mut i = slot.hash as usize & mask;
            while self.slots[i].is_some() {
                i = (i + 1) & mask;
            }
            self.slots[i] = Some(slot);
        }
    }

    /// Closes ingestion: drains every occupied slot and returns the entries
    /// sorted by name bytes. Slot order is never observable.
    pub fn into_report(self) -> Vec<StationStats> {
        let mut entries: Vec<StationStats> = self
            .slots
            .into_iter()
            .flatten()
            .map(|slot| slot.stats)
            .collect();

        entries.sort_unstable_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
        entries
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new(DEFAULT_SLOTS)
    }
}
