use super::ui;
use crate::core::SharedTable;
use anyhow::Result;
use std::io::Write;

pub async fn run(table: &SharedTable, json: bool, out: &mut impl Write) -> Result<()> {
    let records = table.snapshot().await;

    if json {
        serde_json::to_writer_pretty(&mut *out, &records)?;
        writeln!(out)?;
        return Ok(());
    }

    if records.is_empty() {
        writeln!(
            out,
            "{}",
            ui::style_text("No currencies loaded.", ui::StyleType::Subtle)
        )?;
        return Ok(());
    }

    writeln!(
        out,
        "{}\n",
        ui::style_text("Available currencies", ui::StyleType::Title)
    )?;
    writeln!(out, "{}", ui::currency_table(&records))?;
    Ok(())
}
