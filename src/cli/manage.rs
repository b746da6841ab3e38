use super::ui;
use crate::core::SharedTable;
use crate::core::currency::{normalize_code, validate_rate};
use crate::store::{self, StoreFormat};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

pub async fn add(
    table: &SharedTable,
    code: &str,
    rate: f64,
    name: &str,
    out: &mut impl Write,
) -> Result<()> {
    let code = normalize_code(code)?;
    let rate = validate_rate(rate)?;
    table.add_currency(&code, rate, name.trim()).await?;
    writeln!(
        out,
        "Currency {} added successfully!",
        ui::style_text(&code, ui::StyleType::Label)
    )?;
    Ok(())
}

/// Replaces the table with the contents of `path`.
pub async fn import(table: &SharedTable, path: &Path, out: &mut impl Write) -> Result<()> {
    let mut guard = table.lock().await;
    store::load(path, StoreFormat::from_path(path), &mut guard)
        .with_context(|| format!("Failed to import {}", path.display()))?;
    writeln!(
        out,
        "Loaded {} currencies from {}",
        guard.len(),
        path.display()
    )?;
    Ok(())
}

pub async fn export(table: &SharedTable, path: &Path, out: &mut impl Write) -> Result<()> {
    let guard = table.lock().await;
    store::save(path, StoreFormat::from_path(path), &guard)
        .with_context(|| format!("Failed to export to {}", path.display()))?;
    writeln!(out, "Data saved to {} successfully!", path.display())?;
    Ok(())
}
