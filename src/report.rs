use std::io::{self, Write};

use crate::table::StationStats;

/// The finalized output of one run: per-station statistics sorted by name,
/// plus ingestion counters.
#[derive(Debug)]
pub struct Report {
    pub entries: Vec<StationStats>,
    /// Records folded into the table.
    pub records: u64,
    /// Malformed lines dropped under the lenient policy.
    pub skipped: u64,
}

impl Report {
    /// Writes `name;min;mean;max` per station, two decimals per numeric field.
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        for stats in &self.entries {
            writeln!(
                out,
                "{};{:.2};{:.2};{:.2}",
                stats.name,
                stats.min,
                stats.mean(),
                stats.max
            )?;
        }
        Ok(())
    }
}
