use crate::error::ParseError;
use crate::scan::ByteScan;

/// Longest accepted station name, in bytes.
pub const MAX_NAME_LEN: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record<'a> {
    pub name: &'a str,
    pub value: f64,
}

/// Splits one line (without its trailing newline) at the first `;` into a
/// station name and a finite base-10 measurement.
pub fn parse(line: &[u8]) -> Result<Record<'_>, ParseError> {
    let semicolon = line
        .byte_position(b';')
        .ok_or(ParseError::MissingDelimiter)?;
    let (name, rest) = line.split_at(semicolon);

    if name.is_empty() {
        return Err(ParseError::EmptyName);
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ParseError::NameTooLong(name.len()));
    }

    let name = std::str::from_utf8(name).map_err(|_| ParseError::InvalidName)?;

    let raw_value = &rest[1..];
    let value = std::str::from_utf8(raw_value)
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::InvalidValue(String::from_utf8_lossy(raw_value).into_owned()))?;

    Ok(Record { name, value })
}
