use std::io::Write;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use station_stats::{run, IngestOptions, ParsePolicy};

const USAGE: &str = "usage: station-stats [--lenient] <measurements-file>";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut lenient = false;
    let mut path: Option<String> = None;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--lenient" => lenient = true,
            flag if flag.starts_with('-') => bail!("{USAGE}"),
            _ if path.is_none() => path = Some(arg),
            _ => bail!("{USAGE}"),
        }
    }

    let Some(path) = path else {
        bail!("{USAGE}");
    };

    let opts = IngestOptions {
        policy: if lenient {
            ParsePolicy::Lenient
        } else {
            ParsePolicy::Strict
        },
        ..IngestOptions::default()
    };

    let started = Instant::now();
    let report = run(&path, &opts).with_context(|| format!("failed to process {path}"))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report.write_to(&mut out)?;
    out.flush()?;

    info!(
        stations = report.entries.len(),
        records = report.records,
        skipped = report.skipped,
        elapsed_secs = started.elapsed().as_secs_f64(),
        "run complete"
    );

    Ok(())
}
