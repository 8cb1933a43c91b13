//! Folds `.vscode/settings.json` and an existing `cspell.json` into a
//! normalized `cspell.json`, then registers the spellcheck script in
//! `package.json`.
//!
//! Files are written one after another with no rollback: a failure part way
//! leaves the files already written in place.

use crate::app::formatter::{to_report_json, to_tab_json};
use crate::app::manifest::ensure_script;
use crate::app::models::{
    CspellConfig, MigrateDefaults, CONFIG_FILE, MANIFEST_FILE, SETTINGS_DIR, SETTINGS_FILE,
};
use crate::app::normalize::normalize;
use crate::app::settings::{reduce_settings, SettingsAction};
use crate::app::store::FileStore;
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::io::Write;
use std::path::{Path, PathBuf};

/// What happened to the legacy settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsOutcome {
    Absent,
    Rewritten,
    Deleted,
    DeletedWithDir,
    Untouched,
}

#[derive(Debug)]
pub struct MigrationSummary {
    pub config: CspellConfig,
    pub settings: SettingsOutcome,
    pub manifest_updated: bool,
}

fn parse_object(path: &Path, content: &str) -> Result<Map<String, Value>> {
    serde_json::from_str(content).with_context(|| format!("Failed to parse {:?}", path))
}

/// Merges the existing `cspell.json`, if any, into `config`.
fn merge_saved_config(store: &dyn FileStore, config: &mut CspellConfig) -> Result<()> {
    let path = Path::new(CONFIG_FILE);
    let Some(content) = store.read(path)? else {
        return Ok(());
    };

    let saved: CspellConfig =
        serde_json::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))?;
    log::info!("Merging existing {}", CONFIG_FILE);

    config.language = saved.language;
    config.dictionaries = saved.dictionaries;
    config.words.extend(saved.words);
    config.ignore_paths.extend(saved.ignore_paths);
    Ok(())
}

/// Pulls the spell-checker keys out of the legacy settings file and applies
/// the resulting action to it.
fn migrate_settings(store: &dyn FileStore, config: &mut CspellConfig) -> Result<SettingsOutcome> {
    let dir = Path::new(SETTINGS_DIR);
    let path: PathBuf = dir.join(SETTINGS_FILE);
    let Some(content) = store.read(&path)? else {
        return Ok(SettingsOutcome::Absent);
    };

    let settings = parse_object(&path, &content)?;
    let dir_has_other_entries = store.dir_entry_count(dir)? > 1;
    let reduction = reduce_settings(settings, dir_has_other_entries)
        .with_context(|| format!("Invalid spell-checker settings in {:?}", path))?;

    config.words.extend(reduction.words);
    config.ignore_paths.extend(reduction.ignore_paths);

    let outcome = match reduction.action {
        SettingsAction::Rewrite(rest) => {
            log::info!(
                "Keeping remaining settings in {:?}: {}",
                path,
                Value::Object(rest.clone())
            );
            store.write(&path, &to_tab_json(&rest)?)?;
            SettingsOutcome::Rewritten
        }
        SettingsAction::DeleteFile => {
            log::info!("Removing {:?}", path);
            store.remove_file(&path)?;
            SettingsOutcome::Deleted
        }
        SettingsAction::DeleteFileAndDir => {
            log::info!("Removing {:?} and its directory", path);
            store.remove_file(&path)?;
            store.remove_dir(dir)?;
            SettingsOutcome::DeletedWithDir
        }
        SettingsAction::LeaveUntouched => {
            log::info!("No spell-checker settings in {:?}", path);
            SettingsOutcome::Untouched
        }
    };
    Ok(outcome)
}

fn register_script(store: &dyn FileStore, defaults: &MigrateDefaults) -> Result<bool> {
    let path = Path::new(MANIFEST_FILE);
    let content = store.read_required(path)?;
    let mut manifest = parse_object(path, &content)?;

    let updated = ensure_script(&mut manifest, &defaults.script_name, &defaults.script_command)
        .with_context(|| format!("Cannot register script in {:?}", path))?;

    if updated {
        log::info!(
            "Registered \"{}\": \"{}\" in {}",
            defaults.script_name,
            defaults.script_command,
            MANIFEST_FILE
        );
        store.write(path, &to_tab_json(&manifest)?)?;
    } else {
        log::info!(
            "Script \"{}\" already present in {}",
            defaults.script_name,
            MANIFEST_FILE
        );
    }
    Ok(updated)
}

/// Runs the full migration against `store`, printing the resulting word and
/// ignore-path lists to `out`.
pub fn migrate(
    store: &dyn FileStore,
    defaults: &MigrateDefaults,
    out: &mut dyn Write,
) -> Result<MigrationSummary> {
    let mut config = CspellConfig::baseline(defaults);

    merge_saved_config(store, &mut config)?;
    let settings = migrate_settings(store, &mut config)?;

    config.words = normalize(std::mem::take(&mut config.words));
    config.ignore_paths = normalize(std::mem::take(&mut config.ignore_paths));

    writeln!(out, "{}", to_report_json(&config.report())?).context("Failed to write report")?;

    store.write(Path::new(CONFIG_FILE), &to_tab_json(&config)?)?;

    let manifest_updated = register_script(store, defaults)?;

    Ok(MigrationSummary {
        config,
        settings,
        manifest_updated,
    })
}
