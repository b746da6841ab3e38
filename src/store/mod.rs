//! File persistence for the currency table.
//!
//! Both codecs load into a fresh record list first and only swap it into the
//! table once the whole file parsed, so a failed load leaves the table as it was.

pub mod binary;
pub mod text;

use crate::core::error::Result;
use crate::core::table::CurrencyTable;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFormat {
    Text,
    Binary,
}

impl StoreFormat {
    /// `.txt` files are text, everything else is binary.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("txt") => StoreFormat::Text,
            _ => StoreFormat::Binary,
        }
    }
}

/// Replaces the contents of `table` with the records in `path`.
pub fn load(path: &Path, format: StoreFormat, table: &mut CurrencyTable) -> Result<()> {
    let records = match format {
        StoreFormat::Text => text::read_records(path)?,
        StoreFormat::Binary => binary::read_records(path)?,
    };
    let count = records.len();
    table.replace_all(records);
    info!(path = %path.display(), ?format, count, "Loaded currencies");
    Ok(())
}

/// Writes every record of `table` to `path`, truncating any existing file.
pub fn save(path: &Path, format: StoreFormat, table: &CurrencyTable) -> Result<()> {
    let records = table.records();
    match format {
        StoreFormat::Text => text::write_records(path, &records)?,
        StoreFormat::Binary => binary::write_records(path, &records)?,
    }
    info!(path = %path.display(), ?format, count = records.len(), "Saved currencies");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CurrencyError;
    use tempfile::TempDir;

    fn sample_table() -> CurrencyTable {
        let mut table = CurrencyTable::seeded();
        table.add_currency("EUR", 0.925, "Euro").unwrap();
        table.add_currency("XAU", 0.000431, "Gold (troy ounce)").unwrap();
        table.add_currency("CNY", 7.1234567891, "Chinese Yuan Renminbi").unwrap();
        table
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(StoreFormat::from_path(Path::new("rates.txt")), StoreFormat::Text);
        assert_eq!(StoreFormat::from_path(Path::new("RATES.TXT")), StoreFormat::Text);
        assert_eq!(StoreFormat::from_path(Path::new("rates.dat")), StoreFormat::Binary);
        assert_eq!(StoreFormat::from_path(Path::new("rates")), StoreFormat::Binary);
    }

    #[test]
    fn test_round_trip_both_formats() {
        let dir = TempDir::new().unwrap();
        let original = sample_table();

        for (file, format) in [("t.txt", StoreFormat::Text), ("t.dat", StoreFormat::Binary)] {
            let path = dir.path().join(file);
            save(&path, format, &original).unwrap();

            let mut loaded = CurrencyTable::new();
            load(&path, format, &mut loaded).unwrap();
            assert_eq!(loaded.records(), original.records(), "format {format:?}");
        }
    }

    #[test]
    fn test_missing_file_leaves_table_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nonexistent.dat");
        let mut table = sample_table();

        for format in [StoreFormat::Text, StoreFormat::Binary] {
            let err = load(&path, format, &mut table).unwrap_err();
            assert!(matches!(err, CurrencyError::Io { .. }));
            assert_eq!(table.records(), sample_table().records());
        }
    }

    #[test]
    fn test_corrupt_file_leaves_table_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.txt");
        std::fs::write(&path, "EUR 0.9 Euro\nGBP abc Pound\n").unwrap();
        let mut table = sample_table();

        let err = load(&path, StoreFormat::Text, &mut table).unwrap_err();
        assert!(matches!(err, CurrencyError::CorruptData(_)));
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("t.dat");
        save(&path, StoreFormat::Binary, &sample_table()).unwrap();

        let mut small = CurrencyTable::new();
        small.add_currency("CHF", 0.88, "Swiss Franc").unwrap();
        save(&path, StoreFormat::Binary, &small).unwrap();

        let mut loaded = sample_table();
        load(&path, StoreFormat::Binary, &mut loaded).unwrap();
        assert_eq!(loaded.records(), small.records());
    }
}
