//! Reduction of the legacy `.vscode/settings.json` object.
//!
//! [`reduce_settings`] is pure: it decides what to extract and what should
//! happen to the file, and the migration carries the decision out.

use crate::app::models::{SETTINGS_IGNORE_PATHS_KEY, SETTINGS_WORDS_KEY};
use anyhow::{bail, Result};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum SettingsAction {
    /// Other keys remain; write the reduced object back.
    Rewrite(Map<String, Value>),
    /// Nothing remains; delete the file but keep its directory.
    DeleteFile,
    /// Nothing remains and the directory would be left empty.
    DeleteFileAndDir,
    /// No spell-checker keys were present.
    LeaveUntouched,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsReduction {
    pub words: Vec<String>,
    pub ignore_paths: Vec<String>,
    pub action: SettingsAction,
}

/// `null`, `false`, `0` and `""`.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Removes a recognized key and returns its strings. Falsy values count as
/// absent and stay in the object.
fn take_string_list(settings: &mut Map<String, Value>, key: &str) -> Result<Option<Vec<String>>> {
    match settings.get(key) {
        None => return Ok(None),
        Some(value) if is_falsy(value) => return Ok(None),
        Some(_) => {}
    }

    let Some(value) = settings.shift_remove(key) else {
        return Ok(None);
    };
    let items = match value {
        Value::Array(items) => items,
        other => bail!("Expected {} to be an array of strings, got {}", key, other),
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Ok(s),
            other => bail!("Expected {} to hold only strings, found {}", key, other),
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

/// Extracts the spell-checker keys from `settings` and decides what to do
/// with the file. `dir_has_other_entries` tells whether the settings
/// directory holds anything besides the settings file itself.
pub fn reduce_settings(
    mut settings: Map<String, Value>,
    dir_has_other_entries: bool,
) -> Result<SettingsReduction> {
    let words = take_string_list(&mut settings, SETTINGS_WORDS_KEY)?;
    let ignore_paths = take_string_list(&mut settings, SETTINGS_IGNORE_PATHS_KEY)?;
    let extracted = words.is_some() || ignore_paths.is_some();

    let action = if settings.is_empty() {
        if dir_has_other_entries {
            SettingsAction::DeleteFile
        } else {
            SettingsAction::DeleteFileAndDir
        }
    } else if extracted {
        SettingsAction::Rewrite(settings)
    } else {
        SettingsAction::LeaveUntouched
    };

    Ok(SettingsReduction {
        words: words.unwrap_or_default(),
        ignore_paths: ignore_paths.unwrap_or_default(),
        action,
    })
}
