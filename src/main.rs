// src/main.rs
//! Decimal account CLI entry point
use anyhow::Result;
use clap::Parser;
use decimal_account::cli::{execute, Cli};
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging()?;
    debug!("account-cli v{}", env!("CARGO_PKG_VERSION"));

    let output = execute(&cli)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable JSON.
fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
