use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use memmap2::Mmap;
use tracing::warn;

use crate::error::{Error, Result};
use crate::record;
use crate::report::Report;
use crate::scan::ByteScan;
use crate::table::{Table, DEFAULT_SLOTS};

const CHUNK_SIZE: usize = 4 << 20;

/// What to do with a line that fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParsePolicy {
    /// Abort the run on the first malformed line.
    #[default]
    Strict,
    /// Skip malformed lines and count them in [`Report::skipped`].
    Lenient,
}

#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub policy: ParsePolicy,
    /// Initial slot count for the table; it grows past this on demand.
    pub slots: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            policy: ParsePolicy::Strict,
            slots: DEFAULT_SLOTS,
        }
    }
}

struct Run {
    table: Table,
    policy: ParsePolicy,
    line_no: u64,
    records: u64,
    skipped: u64,
}

impl Run {
    fn new(opts: &IngestOptions) -> Self {
        Self {
            table: Table::new(opts.slots),
            policy: opts.policy,
            line_no: 0,
            records: 0,
            skipped: 0,
        }
    }

    fn feed_line(&mut self, line: &[u8]) -> Result<()> {
        self.line_no += 1;

        match record::parse(line) {
            Ok(rec) => {
                self.table.upsert(rec.name, rec.value);
                self.records += 1;
                Ok(())
            }
            Err(source) => match self.policy {
                ParsePolicy::Strict => Err(Error::Parse {
                    line: self.line_no,
                    source,
                }),
                ParsePolicy::Lenient => {
                    warn!(line = self.line_no, %source, "skipping malformed line");
                    self.skipped += 1;
                    Ok(())
                }
            },
        }
    }

    /// Feeds every newline-terminated line in `buf`; returns the offset of
    /// the trailing partial line, if any.
    fn feed_complete_lines(&mut self, buf: &[u8]) -> Result<usize> {
        let mut start = 0;
        while let Some(end) = buf[start..].byte_position(b'\n') {
            self.feed_line(&buf[start..start + end])?;
            start += end + 1;
        }
        Ok(start)
    }

    fn finish(self) -> Report {
        Report {
            entries: self.table.into_report(),
            records: self.records,
            skipped: self.skipped,
        }
    }
}

/// Streams the file through a fixed-size buffer in one pass.
pub fn run<P: AsRef<Path>>(path: P, opts: &IngestOptions) -> Result<Report> {
    let file = File::open(path)?;
    run_reader(BufReader::new(file), opts)
}

pub fn run_reader<R: Read>(reader: R, opts: &IngestOptions) -> Result<Report> {
    scan_reader(reader, CHUNK_SIZE, opts)
}

/// Maps the whole file and walks it as a single slice. Output is identical
/// to [`run`] on the same input.
pub fn run_mmap<P: AsRef<Path>>(path: P, opts: &IngestOptions) -> Result<Report> {
    let file = File::open(path)?;
    let mut run = Run::new(opts);

    // Zero-length mappings are rejected by the OS.
    if file.metadata()?.len() == 0 {
        return Ok(run.finish());
    }

    let map = unsafe { Mmap::map(&file)? };
    let consumed = run.feed_complete_lines(&map)?;
    if consumed < map.len() {
        run.feed_line(&map[consumed..])?;
    }

    Ok(run.finish())
}

fn scan_reader<R: Read>(mut reader: R, chunk_size: usize, opts: &IngestOptions) -> Result<Report> {
    let mut run = Run::new(opts);
    let mut buf = vec![0u8; chunk_size];
    let mut rem: Vec<u8> = Vec::new();

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }

        let mut data = &buf[..n];

        // Complete the line carried over from the previous chunk first.
        if !rem.is_empty() {
            match data.byte_position(b'\n') {
                Some(pos) => {
                    rem.extend_from_slice(&data[..pos]);
                    let line = std::mem::take(&mut rem);
                    run.feed_line(&line)?;
                    data = &data[pos + 1..];
                }
                None => {
                    rem.extend_from_slice(data);
                    continue;
                }
            }
        }

        let consumed = run.feed_complete_lines(data)?;
        rem.extend_from_slice(&data[consumed..]);
    }

    // A final line without a trailing newline still counts.
    if !rem.is_empty() {
        let line = std::mem::take(&mut rem);
        run.feed_line(&line)?;
    }

    Ok(run.finish())
}
