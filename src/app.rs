// Declare modules
pub mod cli;
pub mod config;
pub mod formatter;
pub mod locale;
pub mod manifest;
pub mod migrate;
pub mod models;
pub mod normalize;
pub mod settings;
pub mod store;

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::io::Write;

use self::cli::{Cli, Command};
use self::config::resolve_config;
use self::models::RuntimeConfig;
use self::store::DiskStore;

/// Runs one resolved command against the project root, writing the report to `out`.
pub fn execute(command: &Command, config: &RuntimeConfig, out: &mut dyn Write) -> Result<()> {
    let store = DiskStore::new(config.root.clone());

    match command {
        Command::Migrate { .. } => {
            let summary = migrate::migrate(&store, &config.migrate, out)?;
            log::debug!(
                "Migration finished: {} words, settings {:?}, manifest updated: {}",
                summary.config.words.len(),
                summary.settings,
                summary.manifest_updated
            );
        }
        Command::AddLocale { .. } => {
            locale::add_locale(&store, &config.locale, out)?;
        }
    }

    Ok(())
}

/// Parses arguments, resolves configuration and dispatches the subcommand.
pub fn run() -> Result<()> {
    let args = Cli::parse();
    let command = args.command.clone();
    let command_name = match &command {
        Command::Migrate { .. } => "migrate",
        Command::AddLocale { .. } => "add-locale",
    };

    let current_dir = env::current_dir().context("Failed to get current directory")?;
    let config = resolve_config(args, current_dir)?;

    log::info!("Running {} in {}", command_name, config.root.display());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&command, &config, &mut out)
}
