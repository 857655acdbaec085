use std::io;

use thiserror::Error;

use crate::record::MAX_NAME_LEN;

pub type Result<T> = std::result::Result<T, Error>;

/// Run-level failure: either the input could not be read or, under the
/// strict policy, a line could not be parsed.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {source}")]
    Parse { line: u64, source: ParseError },
}

/// Why a single input line was rejected.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing ';' delimiter")]
    MissingDelimiter,

    #[error("empty station name")]
    EmptyName,

    #[error("station name is {0} bytes (limit {limit})", limit = MAX_NAME_LEN)]
    NameTooLong(usize),

    #[error("station name is not valid UTF-8")]
    InvalidName,

    #[error("invalid measurement {0:?}")]
    InvalidValue(String),
}
