//! Core currency table, conversion engine and ambient plumbing

pub mod config;
pub mod currency;
pub mod error;
pub mod log;
pub mod provider;
pub mod table;

// Re-export main types for cleaner imports
pub use currency::{Conversion, CurrencyRecord};
pub use error::{CurrencyError, Result};
pub use provider::{CurrencyRateProvider, SharedTable};
pub use table::CurrencyTable;
