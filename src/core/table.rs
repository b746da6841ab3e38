//! The in-memory currency table and the USD pivot conversion engine.

use crate::core::currency::{Conversion, CurrencyRecord, round_half_up, validate_amount, validate_rate};
use crate::core::error::{CurrencyError, Result};
use std::collections::BTreeMap;
use tracing::debug;

pub const NO_CONVERSION: &str = "No conversions yet";

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    rate: f64,
    name: String,
}

/// Currency codes mapped to USD-relative rates and display names.
///
/// The table keeps a base record (USD unless configured otherwise) that the
/// single-target conversion pivots from. The base is not inserted into the
/// map unless the table is built with [`CurrencyTable::seeded`].
#[derive(Debug, Clone)]
pub struct CurrencyTable {
    base: CurrencyRecord,
    entries: BTreeMap<String, Entry>,
    last_conversion: Option<Conversion>,
}

impl CurrencyTable {
    pub fn new() -> Self {
        Self::with_base(CurrencyRecord::default())
    }

    pub fn with_base(base: CurrencyRecord) -> Self {
        Self {
            base,
            entries: BTreeMap::new(),
            last_conversion: None,
        }
    }

    /// A table holding only its base record.
    pub fn seeded() -> Self {
        let mut table = Self::new();
        let base = table.base.clone();
        table.insert(base);
        table
    }

    pub fn base(&self) -> &CurrencyRecord {
        &self.base
    }

    /// Converts `amount` of `from` into `to` via USD, rounded half-up to cents.
    pub fn convert(&mut self, amount: f64, from: &str, to: &str) -> Result<f64> {
        let amount = validate_amount(amount)?;
        let source = self.get(from).ok_or_else(|| {
            CurrencyError::InvalidArgument(format!("Source currency not found: {from}"))
        })?;
        let target = self.get(to).ok_or_else(|| {
            CurrencyError::InvalidArgument(format!("Target currency not found: {to}"))
        })?;

        let amount_in_usd = source.to_base(amount);
        let result = round_half_up(target.from_base(amount_in_usd));

        let conversion = Conversion {
            amount,
            from: from.to_string(),
            result,
            to: to.to_string(),
        };
        debug!(%conversion, "Converted");
        self.last_conversion = Some(conversion);
        Ok(result)
    }

    /// Converts from the base currency into `to`.
    pub fn convert_from_base(&mut self, amount: f64, to: &str) -> Result<f64> {
        let from = self.base.code.clone();
        self.convert(amount, &from, to)
    }

    /// Inserts or replaces a currency.
    pub fn add_currency(&mut self, code: &str, rate: f64, name: &str) -> Result<()> {
        let rate = validate_rate(rate)?;
        self.insert(CurrencyRecord::new(code, rate, name));
        Ok(())
    }

    pub fn find_currency(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    pub fn rate(&self, code: &str) -> Option<f64> {
        self.entries.get(code).map(|e| e.rate)
    }

    pub fn name(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(|e| e.name.as_str())
    }

    pub fn get(&self, code: &str) -> Option<CurrencyRecord> {
        self.entries
            .get(code)
            .map(|e| CurrencyRecord::new(code, e.rate, e.name.clone()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All records sorted by code.
    pub fn records(&self) -> Vec<CurrencyRecord> {
        self.entries
            .iter()
            .map(|(code, e)| CurrencyRecord::new(code.clone(), e.rate, e.name.clone()))
            .collect()
    }

    /// Replaces every record with `records`. Later duplicates win.
    pub fn replace_all(&mut self, records: impl IntoIterator<Item = CurrencyRecord>) {
        self.entries.clear();
        for record in records {
            self.insert(record);
        }
        debug!(count = self.entries.len(), "Replaced currency table");
    }

    pub fn last_conversion(&self) -> Option<&Conversion> {
        self.last_conversion.as_ref()
    }

    /// Human readable summary of the most recent conversion.
    pub fn last_conversion_summary(&self) -> String {
        self.last_conversion
            .as_ref()
            .map_or_else(|| NO_CONVERSION.to_string(), |c| c.to_string())
    }

    /// Fixed-width listing of every currency, sorted by code.
    pub fn show_all_currencies(&self) -> String {
        let mut output = format!(
            "{:<10}{:<25}{}\n",
            "Code", "Currency Name", "Exchange Rate (to USD)"
        );
        for record in self.records() {
            output.push_str(&record.to_string());
            output.push('\n');
        }
        output
    }

    fn insert(&mut self, record: CurrencyRecord) {
        debug!(code = %record.code, rate = record.rate, "Upserting currency");
        self.entries.insert(
            record.code,
            Entry {
                rate: record.rate,
                name: record.name,
            },
        );
    }
}

impl Default for CurrencyTable {
    fn default() -> Self {
        Self::new()
    }
}
