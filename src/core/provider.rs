//! Rate lookups behind a single shared lock

use crate::core::currency::CurrencyRecord;
use crate::core::error::{CurrencyError, Result};
use crate::core::table::CurrencyTable;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    /// Units of `to` per one unit of `from`.
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64>;
}

/// A currency table that can be handed to several tasks.
///
/// Every operation takes the whole-table lock for its duration.
#[derive(Clone)]
pub struct SharedTable {
    inner: Arc<Mutex<CurrencyTable>>,
}

impl SharedTable {
    pub fn new(table: CurrencyTable) -> Self {
        Self {
            inner: Arc::new(Mutex::new(table)),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, CurrencyTable> {
        self.inner.lock().await
    }

    pub async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64> {
        self.inner.lock().await.convert(amount, from, to)
    }

    pub async fn add_currency(&self, code: &str, rate: f64, name: &str) -> Result<()> {
        self.inner.lock().await.add_currency(code, rate, name)
    }

    /// Copy of the current records, sorted by code.
    pub async fn snapshot(&self) -> Vec<CurrencyRecord> {
        self.inner.lock().await.records()
    }
}

#[async_trait]
impl CurrencyRateProvider for SharedTable {
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64> {
        let table = self.inner.lock().await;
        let from_rate = table.rate(from).ok_or_else(|| {
            CurrencyError::InvalidArgument(format!("Source currency not found: {from}"))
        })?;
        let to_rate = table.rate(to).ok_or_else(|| {
            CurrencyError::InvalidArgument(format!("Target currency not found: {to}"))
        })?;
        debug!(from, to, "Rate lookup");
        Ok(to_rate / from_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared() -> SharedTable {
        let mut table = CurrencyTable::seeded();
        table.add_currency("EUR", 0.8, "Euro").unwrap();
        table.add_currency("INR", 80.0, "Indian Rupee").unwrap();
        SharedTable::new(table)
    }

    #[tokio::test]
    async fn test_get_rate_cross() {
        let provider = shared();
        assert_eq!(provider.get_rate("EUR", "INR").await.unwrap(), 100.0);
        assert_eq!(provider.get_rate("USD", "USD").await.unwrap(), 1.0);
    }

    #[tokio::test]
    async fn test_get_rate_unknown() {
        let provider = shared();
        let err = provider.get_rate("USD", "ZZZ").await.unwrap_err();
        assert!(matches!(err, CurrencyError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let provider = shared();
        let other = provider.clone();
        other.add_currency("GBP", 0.5, "British Pound").await.unwrap();

        assert_eq!(provider.convert(10.0, "USD", "GBP").await.unwrap(), 5.0);
        assert_eq!(
            other.lock().await.last_conversion_summary(),
            "10.00 USD = 5.00 GBP"
        );
        assert_eq!(provider.snapshot().await.len(), 4);
    }

    #[tokio::test]
    async fn test_concurrent_adds() {
        let provider = shared();
        let handles: Vec<_> = ["AAA", "BBB", "CCC", "DDD"]
            .into_iter()
            .map(|code| {
                let provider = provider.clone();
                tokio::spawn(async move { provider.add_currency(code, 2.0, code).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert_eq!(provider.snapshot().await.len(), 7);
    }
}
