use crate::core::CurrencyRecord;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Label,
    Value,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Label => style(text).bold(),
        StyleType::Value => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Right aligned rate with four decimals.
pub fn rate_cell(rate: f64) -> Cell {
    Cell::new(format!("{rate:.4}")).set_alignment(CellAlignment::Right)
}

/// Renders every record as a table, in the order given.
pub fn currency_table(records: &[CurrencyRecord]) -> String {
    let mut table = new_styled_table();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Currency Name"),
        header_cell("Exchange Rate (to USD)"),
    ]);
    for record in records {
        table.add_row(vec![
            Cell::new(&record.code).add_attribute(Attribute::Bold),
            Cell::new(&record.name),
            rate_cell(record.rate),
        ]);
    }
    table.to_string()
}

/// Display name for a code, `Unknown` when it is not in the table.
pub fn display_name(name: Option<&str>) -> &str {
    name.unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_table_contains_rows() {
        let rendered = currency_table(&[
            CurrencyRecord::new("EUR", 0.925, "Euro"),
            CurrencyRecord::new("JPY", 149.5, "Japanese Yen"),
        ]);
        assert!(rendered.contains("EUR"));
        assert!(rendered.contains("Japanese Yen"));
        assert!(rendered.contains("0.9250"));
        assert!(rendered.contains("149.5000"));
    }

    #[test]
    fn test_display_name_fallback() {
        assert_eq!(display_name(Some("Euro")), "Euro");
        assert_eq!(display_name(None), "Unknown");
    }
}
