//! Single-pass aggregation of `station;measurement` text files.
//!
//! Lines go through [`record::parse`] into a [`table::Table`], which keeps
//! running min/max/sum/count per station; finalizing yields a [`Report`]
//! sorted by station name.

pub mod error;
pub mod ingest;
pub mod record;
pub mod report;
pub mod scan;
pub mod table;

pub use error::{Error, ParseError, Result};
pub use ingest::{run, run_mmap, run_reader, IngestOptions, ParsePolicy};
pub use report::Report;
pub use table::{StationStats, Table};
