// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! specdoc - schema migrations for specification documents

mod commands;
mod config;
mod env;
mod exit_error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{migrate, status, versions};
use config::Config;
use exit_error::{ExitError, EXIT_FAILED, EXIT_USAGE};
use output::OutputFormat;
use specdoc_migrate::Migrator;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "specdoc",
    version,
    about = "Migrate specification documents between schema versions"
)]
struct Cli {
    /// Config file (default: $SPECDOC_CONFIG, ./specdoc.toml, then the user config dir)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t,
        global = true
    )]
    output: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List known schema versions
    Versions,
    /// Show each document's schema version and what a migration would do
    Status(status::StatusArgs),
    /// Migrate documents to the latest (or a given) schema version
    Migrate(migrate::MigrateArgs),
}

fn main() {
    if let Err(e) = run() {
        let code = e
            .downcast_ref::<ExitError>()
            .map_or(EXIT_FAILED, |c| c.code);
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {}", msg);
        }
        std::process::exit(code);
    }
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains the source error text, we skip
/// the "Caused by" chain to avoid noisy duplicate output (common when
/// thiserror variants use `#[error("... {0}")]` with `#[from]`).
/// Otherwise we render the full chain so context isn't lost.
pub(crate) fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

fn setup_logging(filter: &str) {
    use std::io::IsTerminal;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let (env_filter, invalid) = match EnvFilter::try_new(filter) {
        Ok(f) => (f, false),
        Err(_) => (EnvFilter::new(config::DEFAULT_LOG), true),
    };

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .try_init();

    if invalid {
        tracing::warn!(filter, "invalid log filter, using {}", config::DEFAULT_LOG);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.output;

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            // No subcommand: print help and exit 0
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
            return Ok(());
        }
    };

    let config = Config::load(cli.config.as_deref())
        .map_err(|e| ExitError::new(EXIT_USAGE, e.to_string()))?;
    setup_logging(&config.log_filter());
    if let Some(source) = &config.source {
        tracing::debug!(path = %source.display(), "loaded config");
    }

    let registry = specdoc_migrate::builtin::registry()?;
    let migrator = Migrator::with_config(registry, config.migration());

    match command {
        Commands::Versions => versions::handle(registry, format)?,
        Commands::Status(args) => status::handle(args, &migrator, format)?,
        Commands::Migrate(args) => {
            let backup = config.backup && !env::no_backup();
            migrate::handle(args, &migrator, backup, format)?
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
