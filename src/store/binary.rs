//! Fixed binary layout in native byte order:
//!
//! ```text
//! [i32 count]
//! count x ( [i32 code_len][code bytes] [f64 rate] [i32 name_len][name bytes] )
//! ```
//!
//! Files are only portable between machines with the same endianness.

use crate::core::currency::CurrencyRecord;
use crate::core::error::{CurrencyError, Result};
use byteorder::{NativeEndian, ReadBytesExt, WriteBytesExt};
use std::fs::{self, File};
use std::io::{self, BufWriter, Cursor, Read, Write};
use std::path::Path;
use tracing::debug;

pub fn read_records(path: &Path) -> Result<Vec<CurrencyRecord>> {
    let bytes = fs::read(path).map_err(|e| CurrencyError::io(path, e))?;
    let records = decode(&bytes)?;
    debug!(path = %path.display(), count = records.len(), "Read binary records");
    Ok(records)
}

pub fn write_records(path: &Path, records: &[CurrencyRecord]) -> Result<()> {
    check_lengths(records)?;
    let file = File::create(path).map_err(|e| CurrencyError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_into(&mut writer, records)
        .and_then(|_| writer.flush())
        .map_err(|e| CurrencyError::io(path, e))?;
    debug!(path = %path.display(), count = records.len(), "Wrote binary records");
    Ok(())
}

/// Writes the count followed by every record.
pub fn write_into<W: Write>(writer: &mut W, records: &[CurrencyRecord]) -> io::Result<()> {
    writer.write_i32::<NativeEndian>(to_i32(records.len())?)?;
    for record in records {
        write_str(writer, &record.code)?;
        writer.write_f64::<NativeEndian>(record.rate)?;
        write_str(writer, &record.name)?;
    }
    Ok(())
}

/// Parses a whole file image. The declared count must account for every byte.
pub fn decode(bytes: &[u8]) -> Result<Vec<CurrencyRecord>> {
    let mut reader = Cursor::new(bytes);
    let count = read_len(&mut reader, "record count")?;
    let mut records = Vec::new();
    for index in 0..count {
        let record = read_record(&mut reader).map_err(|e| in_record(e, index))?;
        records.push(record);
    }

    let trailing = bytes.len() as u64 - reader.position();
    if trailing > 0 {
        return Err(CurrencyError::CorruptData(format!(
            "{trailing} bytes left after {count} records"
        )));
    }
    Ok(records)
}

fn check_lengths(records: &[CurrencyRecord]) -> Result<()> {
    let too_long = |what: &str, len: usize| {
        CurrencyError::InvalidArgument(format!("{what} {len} does not fit the binary format"))
    };
    i32::try_from(records.len()).map_err(|_| too_long("record count", records.len()))?;
    for record in records {
        i32::try_from(record.code.len()).map_err(|_| too_long("code length", record.code.len()))?;
        i32::try_from(record.name.len()).map_err(|_| too_long("name length", record.name.len()))?;
    }
    Ok(())
}

fn to_i32(len: usize) -> io::Result<i32> {
    i32::try_from(len).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

fn write_str<W: Write>(writer: &mut W, value: &str) -> io::Result<()> {
    writer.write_i32::<NativeEndian>(to_i32(value.len())?)?;
    writer.write_all(value.as_bytes())
}

fn read_record(reader: &mut Cursor<&[u8]>) -> Result<CurrencyRecord> {
    let code = read_str(reader, "code")?;
    let rate = reader
        .read_f64::<NativeEndian>()
        .map_err(|e| truncated(e, "rate"))?;
    let name = read_str(reader, "name")?;
    Ok(CurrencyRecord { code, rate, name })
}

fn read_len(reader: &mut Cursor<&[u8]>, what: &str) -> Result<usize> {
    let value = reader
        .read_i32::<NativeEndian>()
        .map_err(|e| truncated(e, what))?;
    usize::try_from(value)
        .map_err(|_| CurrencyError::CorruptData(format!("negative {what}: {value}")))
}

fn read_str(reader: &mut Cursor<&[u8]>, what: &str) -> Result<String> {
    let len = read_len(reader, what)?;
    let remaining = reader.get_ref().len() as u64 - reader.position();
    if len as u64 > remaining {
        return Err(CurrencyError::CorruptData(format!(
            "truncated {what}: need {len} bytes, {remaining} left"
        )));
    }
    let mut raw = vec![0u8; len];
    reader.read_exact(&mut raw).map_err(|e| truncated(e, what))?;
    String::from_utf8(raw)
        .map_err(|_| CurrencyError::CorruptData(format!("{what} is not valid UTF-8")))
}

fn truncated(err: io::Error, what: &str) -> CurrencyError {
    match err.kind() {
        io::ErrorKind::UnexpectedEof => CurrencyError::CorruptData(format!("truncated {what}")),
        _ => CurrencyError::CorruptData(format!("unreadable {what}: {err}")),
    }
}

fn in_record(err: CurrencyError, index: usize) -> CurrencyError {
    match err {
        CurrencyError::CorruptData(msg) => {
            CurrencyError::CorruptData(format!("record {index}: {msg}"))
        }
        other => other,
    }
}
