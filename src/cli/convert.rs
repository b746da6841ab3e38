use super::ui;
use crate::core::currency::{normalize_code, validate_amount};
use crate::core::{CurrencyRateProvider, SharedTable};
use anyhow::Result;
use std::io::Write;

/// Converts `amount` from `from` into `to`, or from USD into `from` when `to` is absent.
pub async fn run(
    table: &SharedTable,
    amount: f64,
    from: &str,
    to: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let amount = validate_amount(amount)?;
    let (from, to) = match to {
        Some(to) => (normalize_code(from)?, normalize_code(to)?),
        None => {
            let base = table.lock().await.base().code.clone();
            (base, normalize_code(from)?)
        }
    };

    let result = table.convert(amount, &from, &to).await?;

    let guard = table.lock().await;
    writeln!(
        out,
        "{}",
        ui::style_text("Conversion result", ui::StyleType::Title)
    )?;
    writeln!(
        out,
        "{amount:.2} {from} ({})",
        ui::display_name(guard.name(&from))
    )?;
    writeln!(
        out,
        "  = {} {to} ({})",
        ui::style_text(&format!("{result:.2}"), ui::StyleType::Value),
        ui::display_name(guard.name(&to))
    )?;
    Ok(())
}

/// Prints how many units of `to` one unit of `from` buys.
pub async fn rate(
    provider: &dyn CurrencyRateProvider,
    from: &str,
    to: &str,
    out: &mut impl Write,
) -> Result<()> {
    let from = normalize_code(from)?;
    let to = normalize_code(to)?;
    let rate = provider.get_rate(&from, &to).await?;
    writeln!(
        out,
        "1 {from} = {} {to}",
        ui::style_text(&format!("{rate:.6}"), ui::StyleType::Value)
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CurrencyError, CurrencyTable};

    fn shared() -> SharedTable {
        let mut table = CurrencyTable::seeded();
        table.add_currency("EUR", 0.925, "Euro").unwrap();
        table.add_currency("GBP", 0.8, "British Pound").unwrap();
        SharedTable::new(table)
    }

    #[tokio::test]
    async fn test_convert_normalizes_codes() {
        let table = shared();
        let mut out = Vec::new();
        run(&table, 100.0, "usd", Some("eur"), &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("100.00 USD (US Dollar)"));
        assert!(text.contains("92.50"));
        assert!(text.contains("EUR (Euro)"));
        assert_eq!(
            table.lock().await.last_conversion_summary(),
            "100.00 USD = 92.50 EUR"
        );
    }

    #[tokio::test]
    async fn test_single_code_converts_from_base() {
        let table = shared();
        let mut out = Vec::new();
        run(&table, 10.0, "gbp", None, &mut out).await.unwrap();
        assert_eq!(
            table.lock().await.last_conversion_summary(),
            "10.00 USD = 8.00 GBP"
        );
    }

    #[tokio::test]
    async fn test_convert_errors_are_typed() {
        let table = shared();
        let mut out = Vec::new();

        let err = run(&table, 10.0, "USD", Some("ZZZ"), &mut out)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CurrencyError>(),
            Some(CurrencyError::InvalidArgument(_))
        ));
        assert!(err.to_string().contains("ZZZ"));

        assert!(run(&table, -5.0, "USD", Some("EUR"), &mut out).await.is_err());
        assert!(run(&table, 5.0, "US", Some("EUR"), &mut out).await.is_err());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_rate_output() {
        let table = shared();
        let mut out = Vec::new();
        rate(&table, "gbp", "usd", &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("1 GBP = "));
        assert!(text.contains("1.250000"));
    }
}
