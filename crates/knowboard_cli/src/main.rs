//! Knowledge board CLI.
//!
//! # Responsibility
//! - Parse arguments, start logging and open the durable board.
//! - Dispatch one subcommand per invocation.

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use knowboard_core::db::open_db;
use knowboard_core::{
    default_log_level, init_logging, BoardConfig, BoardService, SecureIdGenerator, SqliteKvStore,
};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)
            .map_err(anyhow::Error::msg)
            .context("failed to initialize logging")?;
    }

    let mut config = BoardConfig::default();
    if let Some(key) = cli.storage_key {
        config.storage_key = key;
    }

    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open board database `{}`", cli.db.display()))?;
    let store = SqliteKvStore::try_new(&conn)?;
    let mut board = BoardService::open(store, SecureIdGenerator, &config);

    commands::run(&mut board, cli.command)
}
