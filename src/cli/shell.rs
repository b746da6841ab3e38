//! Line oriented interactive session over a single table.

use super::ui;
use crate::core::CurrencyTable;
use crate::core::currency::{normalize_code, validate_amount, validate_rate};
use anyhow::{Context, Result, anyhow, bail};
use std::io::{BufRead, Write};
use tracing::debug;

const HELP: &str = "\
Commands:
  convert <AMOUNT> <FROM> [TO]   convert between currencies (one code converts from USD)
  list                           show all currencies
  add <CODE> <RATE> <NAME...>    add or update a currency (1 USD = RATE CODE)
  last                           show the last conversion
  help                           show this help
  quit                           leave the shell";

/// Reads commands from `input` until `quit` or end of input.
///
/// Returns whether the table was modified.
pub fn run(table: &mut CurrencyTable, input: impl BufRead, out: &mut impl Write) -> Result<bool> {
    let mut changed = false;
    writeln!(
        out,
        "{}",
        ui::style_text("Currency converter", ui::StyleType::Title)
    )?;
    writeln!(out, "Type 'help' for commands.")?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let args: Vec<&str> = words.collect();
        debug!(command, ?args, "Shell command");

        match command.to_ascii_lowercase().as_str() {
            "quit" | "exit" => break,
            "help" => writeln!(out, "{HELP}")?,
            "list" => write!(out, "{}", table.show_all_currencies())?,
            "last" => writeln!(out, "Last Conversion: {}", table.last_conversion_summary())?,
            "convert" => match convert(table, &args) {
                Ok(line) => writeln!(out, "{line}")?,
                Err(e) => report(out, &e)?,
            },
            "add" => match add(table, &args) {
                Ok(code) => {
                    changed = true;
                    writeln!(out, "Currency {code} added successfully!")?;
                }
                Err(e) => report(out, &e)?,
            },
            other => report(out, &anyhow!("Unknown command '{other}', try 'help'"))?,
        }
    }

    Ok(changed)
}

fn convert(table: &mut CurrencyTable, args: &[&str]) -> Result<String> {
    let (amount, from, to) = match args {
        [amount, to] => (*amount, table.base().code.clone(), normalize_code(to)?),
        [amount, from, to] => (*amount, normalize_code(from)?, normalize_code(to)?),
        _ => bail!("usage: convert <AMOUNT> <FROM> [TO]"),
    };
    let amount = parse_number(amount, "amount")?;
    let amount = validate_amount(amount)?;
    let result = table.convert(amount, &from, &to)?;
    Ok(format!(
        "{amount:.2} {from} ({}) = {result:.2} {to} ({})",
        ui::display_name(table.name(&from)),
        ui::display_name(table.name(&to))
    ))
}

fn add(table: &mut CurrencyTable, args: &[&str]) -> Result<String> {
    let [code, rate, name @ ..] = args else {
        bail!("usage: add <CODE> <RATE> <NAME...>");
    };
    let code = normalize_code(code)?;
    let rate = validate_rate(parse_number(rate, "rate")?)?;
    table.add_currency(&code, rate, &name.join(" "))?;
    Ok(code)
}

fn parse_number(token: &str, what: &str) -> Result<f64> {
    token
        .parse()
        .with_context(|| format!("Invalid {what} '{token}': expected a number"))
}

fn report(out: &mut impl Write, err: &anyhow::Error) -> Result<()> {
    writeln!(
        out,
        "{}",
        ui::style_text(&format!("ERROR: {err}"), ui::StyleType::Error)
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(table: &mut CurrencyTable, script: &str) -> (bool, String) {
        let mut out = Vec::new();
        let changed = run(table, script.as_bytes(), &mut out).unwrap();
        (changed, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_convert_and_last() {
        let mut table = CurrencyTable::seeded();
        table.add_currency("EUR", 0.925, "Euro").unwrap();

        let (changed, output) = session(&mut table, "last\nconvert 100 usd eur\nlast\nquit\n");
        assert!(!changed);
        assert!(output.contains("Last Conversion: No conversions yet"));
        assert!(output.contains("100.00 USD (US Dollar) = 92.50 EUR (Euro)"));
        assert!(output.contains("Last Conversion: 100.00 USD = 92.50 EUR"));
    }

    #[test]
    fn test_add_marks_changed() {
        let mut table = CurrencyTable::seeded();
        let (changed, output) = session(&mut table, "add chf 0.88 Swiss Franc\nconvert 10 chf\n");
        assert!(changed);
        assert!(output.contains("Currency CHF added successfully!"));
        assert!(output.contains("= 8.80 CHF (Swiss Franc)"));
        assert_eq!(table.name("CHF"), Some("Swiss Franc"));
    }

    #[test]
    fn test_errors_do_not_end_session() {
        let mut table = CurrencyTable::seeded();
        let script = "convert -5 USD USD\nconvert 10 USD ZZZ\nadd EUR zero Euro\nfly\nlist\n";
        let (changed, output) = session(&mut table, script);
        assert!(!changed);
        assert!(output.contains("ERROR: Invalid argument: Amount cannot be negative"));
        assert!(output.contains("Target currency not found: ZZZ"));
        assert!(output.contains("Invalid rate 'zero'"));
        assert!(output.contains("Unknown command 'fly'"));
        assert!(output.contains("US Dollar"));
    }

    #[test]
    fn test_quit_stops_reading() {
        let mut table = CurrencyTable::seeded();
        let (changed, _) = session(&mut table, "quit\nadd EUR 0.9 Euro\n");
        assert!(!changed);
        assert!(!table.find_currency("EUR"));
    }
}
