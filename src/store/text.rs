//! Line oriented text format: `<CODE> <rate> <name with spaces>` per line.
//!
//! Names run to the end of the line, so a name containing a newline cannot
//! be represented.

use crate::core::currency::CurrencyRecord;
use crate::core::error::{CurrencyError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

pub fn read_records(path: &Path) -> Result<Vec<CurrencyRecord>> {
    let file = File::open(path).map_err(|e| CurrencyError::io(path, e))?;
    let mut records = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| CurrencyError::io(path, e))?;
        if let Some(record) = parse_line(&line, index + 1)? {
            records.push(record);
        }
    }
    debug!(path = %path.display(), count = records.len(), "Read text records");
    Ok(records)
}

pub fn write_records(path: &Path, records: &[CurrencyRecord]) -> Result<()> {
    let file = File::create(path).map_err(|e| CurrencyError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    for record in records {
        writeln!(writer, "{}", format_line(record)).map_err(|e| CurrencyError::io(path, e))?;
    }
    writer.flush().map_err(|e| CurrencyError::io(path, e))?;
    debug!(path = %path.display(), count = records.len(), "Wrote text records");
    Ok(())
}

pub fn format_line(record: &CurrencyRecord) -> String {
    format!("{} {} {}", record.code, record.rate, record.name)
}

/// Parses one line. Blank lines yield `None`.
pub fn parse_line(line: &str, line_number: usize) -> Result<Option<CurrencyRecord>> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let rest = line.trim_start();
    if rest.is_empty() {
        return Ok(None);
    }

    let (code, rest) = split_token(rest);
    let (rate_token, rest) = split_token(rest.trim_start());
    if rate_token.is_empty() {
        return Err(CurrencyError::CorruptData(format!(
            "line {line_number}: missing rate for '{code}'"
        )));
    }
    let invalid_rate = || {
        CurrencyError::CorruptData(format!(
            "line {line_number}: invalid rate '{rate_token}' for '{code}'"
        ))
    };
    // `f64::from_str` also accepts `nan` and `inf`
    let rate: f64 = rate_token.parse().map_err(|_| invalid_rate())?;
    if !rate.is_finite() {
        return Err(invalid_rate());
    }

    // A single separator after the rate; the rest of the line is the name.
    let mut chars = rest.chars();
    let name = match chars.next() {
        Some(c) if c.is_whitespace() => chars.as_str(),
        _ => rest,
    };

    Ok(Some(CurrencyRecord::new(code, rate, name)))
}

fn split_token(input: &str) -> (&str, &str) {
    match input.find(char::is_whitespace) {
        Some(end) => input.split_at(end),
        None => (input, ""),
    }
}
