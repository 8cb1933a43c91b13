use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const CONFIG_FILE: &str = "cspell.json";
pub const SETTINGS_DIR: &str = ".vscode";
pub const SETTINGS_FILE: &str = "settings.json";
pub const MANIFEST_FILE: &str = "package.json";

pub const SETTINGS_WORDS_KEY: &str = "cSpell.words";
pub const SETTINGS_IGNORE_PATHS_KEY: &str = "cSpell.ignorePaths";

pub const CONFIG_VERSION: &str = "0.2";
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_MIN_WORD_LENGTH: u32 = 4;
pub const DEFAULT_IGNORE_PATHS: [&str; 2] = [".git", "package-lock.json"];
pub const DEFAULT_SCRIPT_NAME: &str = "spellcheck";
pub const DEFAULT_SCRIPT_COMMAND: &str = "cspell .";
pub const DEFAULT_LOCALE: &str = "ru";
pub const DEFAULT_DICTIONARY: &str = "ru_ru";

/// The canonical `cspell.json` document.
///
/// Fields missing from a file on disk fall back to their defaults; keys this
/// struct does not know are ignored on load.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CspellConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_min_word_length")]
    pub min_word_length: u32,
    #[serde(default = "default_true")]
    pub enable_glob_dot: bool,
    #[serde(default = "default_true")]
    pub use_gitignore: bool,
    #[serde(default = "default_ignore_paths")]
    pub ignore_paths: Vec<String>,
    #[serde(default)]
    pub dictionaries: Vec<String>,
    #[serde(default)]
    pub words: Vec<String>,
    #[serde(default)]
    pub flag_words: Vec<String>,
}

fn default_version() -> String {
    CONFIG_VERSION.to_string()
}
fn default_true() -> bool {
    true
}
fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}
fn default_min_word_length() -> u32 {
    DEFAULT_MIN_WORD_LENGTH
}
fn default_ignore_paths() -> Vec<String> {
    DEFAULT_IGNORE_PATHS.iter().map(|p| p.to_string()).collect()
}

impl Default for CspellConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            enabled: default_true(),
            language: default_language(),
            min_word_length: default_min_word_length(),
            enable_glob_dot: default_true(),
            use_gitignore: default_true(),
            ignore_paths: default_ignore_paths(),
            dictionaries: Vec::new(),
            words: Vec::new(),
            flag_words: Vec::new(),
        }
    }
}

impl CspellConfig {
    /// Baseline object a migration starts from.
    pub fn baseline(defaults: &MigrateDefaults) -> Self {
        Self {
            language: defaults.language.clone(),
            min_word_length: defaults.min_word_length,
            ignore_paths: defaults.ignore_paths.clone(),
            ..Self::default()
        }
    }

    pub fn report(&self) -> ListsReport<'_> {
        ListsReport {
            words: &self.words,
            ignore_paths: &self.ignore_paths,
        }
    }
}

/// The record printed to stdout after each run.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ListsReport<'a> {
    pub words: &'a [String],
    pub ignore_paths: &'a [String],
}

/// Values the migration seeds a fresh `cspell.json` with.
#[derive(Debug, Clone, PartialEq)]
pub struct MigrateDefaults {
    pub language: String,
    pub min_word_length: u32,
    pub ignore_paths: Vec<String>,
    pub script_name: String,
    pub script_command: String,
}

impl Default for MigrateDefaults {
    fn default() -> Self {
        Self {
            language: default_language(),
            min_word_length: default_min_word_length(),
            ignore_paths: default_ignore_paths(),
            script_name: DEFAULT_SCRIPT_NAME.to_string(),
            script_command: DEFAULT_SCRIPT_COMMAND.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocaleDefaults {
    pub locale: String,
    pub dictionary: String,
}

impl Default for LocaleDefaults {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            dictionary: DEFAULT_DICTIONARY.to_string(),
        }
    }
}

/// Represents the final configuration after merging the user config file and CLI args.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub root: PathBuf,
    pub migrate: MigrateDefaults,
    pub locale: LocaleDefaults,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_baseline() {
        let cfg = CspellConfig::default();
        assert_eq!(cfg.version, "0.2");
        assert!(cfg.enabled);
        assert_eq!(cfg.language, "en");
        assert_eq!(cfg.min_word_length, 4);
        assert!(cfg.enable_glob_dot);
        assert!(cfg.use_gitignore);
        assert_eq!(cfg.ignore_paths, vec![".git", "package-lock.json"]);
        assert!(cfg.dictionaries.is_empty());
        assert!(cfg.words.is_empty());
        assert!(cfg.flag_words.is_empty());
    }

    #[test]
    fn serializes_known_keys_in_document_order() {
        let json = serde_json::to_string(&CspellConfig::default()).unwrap();
        assert_eq!(
            json,
            r#"{"version":"0.2","enabled":true,"language":"en","minWordLength":4,"enableGlobDot":true,"useGitignore":true,"ignorePaths":[".git","package-lock.json"],"dictionaries":[],"words":[],"flagWords":[]}"#
        );
    }

    #[test]
    fn partial_document_fills_defaults_and_drops_unknown_keys() {
        let cfg: CspellConfig =
            serde_json::from_str(r#"{"language":"en-GB","import":["./extra.json"]}"#).unwrap();
        assert_eq!(cfg.language, "en-GB");
        assert_eq!(cfg.min_word_length, 4);

        let json = serde_json::to_string(&cfg).unwrap();
        assert!(!json.contains("import"));
    }

    #[test]
    fn baseline_takes_overridden_defaults() {
        let defaults = MigrateDefaults {
            language: "en-GB".into(),
            min_word_length: 3,
            ignore_paths: vec!["node_modules".into()],
            ..MigrateDefaults::default()
        };
        let cfg = CspellConfig::baseline(&defaults);
        assert_eq!(cfg.language, "en-GB");
        assert_eq!(cfg.min_word_length, 3);
        assert_eq!(cfg.ignore_paths, vec!["node_modules"]);
        assert_eq!(cfg.version, "0.2");
    }
}
