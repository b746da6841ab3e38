//! Currency records and the small numeric helpers shared by the table and the CLI

use crate::core::error::{CurrencyError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub const BASE_CODE: &str = "USD";
pub const BASE_NAME: &str = "US Dollar";

/// A single currency: `1 USD = rate` units of `code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRecord {
    pub code: String,
    pub rate: f64,
    pub name: String,
}

impl CurrencyRecord {
    pub fn new(code: impl Into<String>, rate: f64, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            rate,
            name: name.into(),
        }
    }

    /// Converts an amount of this currency into USD.
    pub fn to_base(&self, amount: f64) -> f64 {
        amount / self.rate
    }

    /// Converts an amount of USD into this currency.
    pub fn from_base(&self, amount: f64) -> f64 {
        amount * self.rate
    }
}

impl Default for CurrencyRecord {
    fn default() -> Self {
        Self::new(BASE_CODE, 1.0, BASE_NAME)
    }
}

impl Display for CurrencyRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:<10}{:<25}{:.4}", self.code, self.name, self.rate)
    }
}

/// Summary of a completed conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub amount: f64,
    pub from: String,
    pub result: f64,
    pub to: String,
}

impl Display for Conversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.2} {} = {:.2} {}",
            self.amount, self.from, self.result, self.to
        )
    }
}

/// Rounds to two decimals with ties going up, e.g. `10.005 -> 10.01`.
pub fn round_half_up(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Trims and uppercases a code, requiring exactly three ASCII letters.
pub fn normalize_code(input: &str) -> Result<String> {
    let code = input.trim();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CurrencyError::InvalidArgument(format!(
            "Invalid currency code '{code}': expected 3 letters"
        )));
    }
    Ok(code.to_ascii_uppercase())
}

pub fn validate_amount(amount: f64) -> Result<f64> {
    if !amount.is_finite() {
        return Err(CurrencyError::InvalidArgument(format!(
            "Amount must be a finite number, got {amount}"
        )));
    }
    if amount < 0.0 {
        return Err(CurrencyError::InvalidArgument(
            "Amount cannot be negative".to_string(),
        ));
    }
    Ok(amount)
}

pub fn validate_rate(rate: f64) -> Result<f64> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(CurrencyError::InvalidArgument(format!(
            "Exchange rate must be a positive number, got {rate}"
        )));
    }
    Ok(rate)
}
