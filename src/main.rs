use anyhow::Context;
use clap::Parser;
use env_logger::Env;

use gator::cli::{AppContext, Cli, CommandTable};
use gator::config::{Config, Session};
use gator::storage::SqliteStorage;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration and the logged-in user
    let config = Config::from_env().context("loading configuration")?;
    let session = Session::load(&config.session_path).with_context(|| {
        format!("reading session file {}", config.session_path.display())
    })?;

    // Initialize storage
    let db_path = config.resolve_db_path(&session);
    let storage = SqliteStorage::new(&db_path)
        .with_context(|| format!("opening database {}", db_path.display()))?;

    let mut ctx = AppContext::new(config, session, storage);
    CommandTable::standard().dispatch(&mut ctx, &cli.command)?;

    Ok(())
}
