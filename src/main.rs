use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxconv::core::log::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fxconv::AppCommand {
    fn from(cmd: Commands) -> fxconv::AppCommand {
        match cmd {
            Commands::List { json } => fxconv::AppCommand::List { json },
            Commands::Convert { amount, from, to } => {
                fxconv::AppCommand::Convert { amount, from, to }
            }
            Commands::Rate { from, to } => fxconv::AppCommand::Rate { from, to },
            Commands::Add { code, rate, name } => fxconv::AppCommand::Add {
                code,
                rate,
                name: name.join(" "),
            },
            Commands::Import { path } => fxconv::AppCommand::Import { path },
            Commands::Export { path } => fxconv::AppCommand::Export { path },
            Commands::Shell => fxconv::AppCommand::Shell,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show all available currencies
    List {
        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },
    /// Convert an amount; with a single code, converts from USD
    Convert {
        amount: f64,
        from: String,
        to: Option<String>,
    },
    /// Show the exchange rate between two currencies
    Rate { from: String, to: String },
    /// Add or update a currency (1 USD = RATE units)
    Add {
        code: String,
        rate: f64,
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Replace the table with a text (.txt) or binary file
    Import { path: PathBuf },
    /// Write the table to a text (.txt) or binary file
    Export { path: PathBuf },
    /// Start an interactive session
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxconv::cli::setup::setup(),
        Some(cmd) => fxconv::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
