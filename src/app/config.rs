use crate::app::cli::{Cli, Command};
use crate::app::models::{LocaleDefaults, MigrateDefaults, RuntimeConfig};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct UserConfigFile {
    #[serde(default)]
    migrate: MigrateSection,
    #[serde(default)]
    locale: LocaleSection,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
struct MigrateSection {
    language: Option<String>,
    min_word_length: Option<u32>,
    ignore_paths: Option<Vec<String>>,
    script_name: Option<String>,
    script_command: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
struct LocaleSection {
    locale: Option<String>,
    dictionary: Option<String>,
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| {
        home.join(".config")
            .join("cspell_migrate")
            .join("config.toml")
    })
}

/// Reads the user config file. An explicitly requested file must exist; the
/// default location is optional.
fn load_user_config(explicit: Option<&Path>) -> Result<UserConfigFile> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(UserConfigFile::default()),
        },
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config at {:?}", path))?;

    toml::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))
}

fn pick(cli: Option<String>, file: Option<String>, default: String) -> String {
    cli.or(file).unwrap_or(default)
}

fn merge(cli: Cli, file: UserConfigFile, root: PathBuf) -> RuntimeConfig {
    let builtin_migrate = MigrateDefaults::default();
    let builtin_locale = LocaleDefaults::default();

    let (cli_script_name, cli_script_command, cli_locale, cli_dictionary) = match cli.command {
        Command::Migrate {
            script_name,
            script_command,
        } => (script_name, script_command, None, None),
        Command::AddLocale { locale, dictionary } => (None, None, locale, dictionary),
    };

    let migrate = MigrateDefaults {
        language: file.migrate.language.unwrap_or(builtin_migrate.language),
        min_word_length: file
            .migrate
            .min_word_length
            .unwrap_or(builtin_migrate.min_word_length),
        ignore_paths: file
            .migrate
            .ignore_paths
            .unwrap_or(builtin_migrate.ignore_paths),
        script_name: pick(
            cli_script_name,
            file.migrate.script_name,
            builtin_migrate.script_name,
        ),
        script_command: pick(
            cli_script_command,
            file.migrate.script_command,
            builtin_migrate.script_command,
        ),
    };

    let locale = LocaleDefaults {
        locale: pick(cli_locale, file.locale.locale, builtin_locale.locale),
        dictionary: pick(
            cli_dictionary,
            file.locale.dictionary,
            builtin_locale.dictionary,
        ),
    };

    RuntimeConfig {
        root,
        migrate,
        locale,
    }
}

/// Resolves the runtime configuration: CLI flag > config file > built-in default.
pub fn resolve_config(cli: Cli, current_dir: PathBuf) -> Result<RuntimeConfig> {
    let file = load_user_config(cli.config.as_deref())?;
    let root = cli.root.clone().unwrap_or(current_dir);
    Ok(merge(cli, file, root))
}
