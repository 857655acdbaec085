use std::fs;
use std::io::{BufWriter, Write};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use rand::Rng;
use rand_distr::{Distribution, Normal};

struct Station {
    name: String,
    distribution: Normal<f64>,
}

impl Station {
    fn sample(&self, rng: &mut impl Rng) -> f64 {
        self.distribution.sample(rng).clamp(-99.9, 99.9)
    }
}

impl FromStr for Station {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (name, mean) = s.split_once(';').context("expected name;mean")?;
        let mean: f64 = mean.parse().context("mean is not a number")?;
        let distribution = Normal::new(mean, 10.0).context("invalid distribution")?;
        Ok(Self {
            name: name.to_string(),
            distribution,
        })
    }
}

fn load_stations(path: &str) -> Result<Vec<Station>> {
    fs::read_to_string(path)
        .with_context(|| format!("could not read {path}"))?
        .lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.parse().with_context(|| format!("bad station line: {line}")))
        .collect()
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);

    let count: u64 = args
        .next()
        .context("usage: create_measurements <count> [stations-file]")?
        .replace('_', "")
        .parse()
        .context("count must be an integer")?;
    let seed_path = args
        .next()
        .unwrap_or_else(|| "data/weather_stations.csv".to_string());

    let stations = load_stations(&seed_path)?;
    if stations.is_empty() {
        bail!("no stations found in {seed_path}");
    }

    let mut rng = rand::rng();
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for _ in 0..count {
        let station = &stations[rng.random_range(0..stations.len())];
        writeln!(out, "{};{:.1}", station.name, station.sample(&mut rng))?;
    }

    out.flush()?;
    Ok(())
}
