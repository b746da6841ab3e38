pub mod cli;
pub mod core;
pub mod store;

use crate::core::config::AppConfig;
use crate::core::{CurrencyError, CurrencyTable, SharedTable};
use crate::store::StoreFormat;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub enum AppCommand {
    List { json: bool },
    Convert { amount: f64, from: String, to: Option<String> },
    Rate { from: String, to: String },
    Add { code: String, rate: f64, name: String },
    Import { path: PathBuf },
    Export { path: PathBuf },
    Shell,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let stdin = std::io::stdin();
    run_command_with_io(command, config_path, stdin.lock(), &mut out).await
}

/// Runs a command against the configured table, reading shell input from
/// `input` and writing everything user facing to `out`.
pub async fn run_command_with_io(
    command: AppCommand,
    config_path: Option<&str>,
    input: impl std::io::BufRead,
    out: &mut impl Write,
) -> Result<()> {
    info!("Currency converter starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let table = SharedTable::new(open_table(&config)?);
    let save_path = config.save_path();

    match command {
        AppCommand::List { json } => cli::list::run(&table, json, out).await,
        AppCommand::Convert { amount, from, to } => {
            cli::convert::run(&table, amount, &from, to.as_deref(), out).await
        }
        AppCommand::Rate { from, to } => cli::convert::rate(&table, &from, &to, out).await,
        AppCommand::Add { code, rate, name } => {
            cli::manage::add(&table, &code, rate, &name, out).await?;
            persist(&table, &save_path).await
        }
        AppCommand::Import { path } => {
            cli::manage::import(&table, &path, out).await?;
            persist(&table, &save_path).await
        }
        AppCommand::Export { path } => cli::manage::export(&table, &path, out).await,
        AppCommand::Shell => {
            // The session blocks on input, so it works on a copy rather than holding the lock.
            let mut session = table.lock().await.clone();
            let changed = cli::shell::run(&mut session, input, out)?;
            *table.lock().await = session;
            if changed {
                persist(&table, &save_path).await?;
            }
            Ok(())
        }
    }
}

/// Builds the startup table.
///
/// The save file wins over the seed file when it exists. A missing seed file
/// is not fatal; the table starts empty or with the base record.
pub fn open_table(config: &AppConfig) -> Result<CurrencyTable> {
    let mut table = CurrencyTable::new();

    let save_path = config.save_path();
    let path = if save_path.exists() {
        save_path
    } else {
        config.data_path()
    };

    match store::load(&path, StoreFormat::from_path(&path), &mut table) {
        Ok(()) => {}
        Err(CurrencyError::Io { path, source }) => {
            warn!(path = %path.display(), error = %source, "Could not load currency data");
            if config.seed_base {
                table = CurrencyTable::seeded();
            }
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to load {}", path.display()));
        }
    }
    Ok(table)
}

async fn persist(table: &SharedTable, path: &Path) -> Result<()> {
    let guard = table.lock().await;
    store::save(path, StoreFormat::from_path(path), &guard)
        .with_context(|| format!("Failed to save currencies to {}", path.display()))
}
