use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Migrate cspell settings into a single cspell.json"
)]
pub struct Cli {
    /// Project directory holding cspell.json, package.json and .vscode/
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// User configuration file (defaults to ~/.config/cspell_migrate/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Merge .vscode/settings.json and cspell.json into a normalized cspell.json
    Migrate {
        /// Name of the package.json script to register
        #[arg(long)]
        script_name: Option<String>,

        /// Command the registered script runs
        #[arg(long)]
        script_command: Option<String>,
    },

    /// Append a locale and its dictionary to cspell.json
    AddLocale {
        /// Locale appended to the language field (e.g. 'ru')
        #[arg(long)]
        locale: Option<String>,

        /// Dictionary appended to the dictionaries list (e.g. 'ru_ru')
        #[arg(long)]
        dictionary: Option<String>,
    },
}
