use crate::app::formatter::{to_report_json, to_tab_json};
use crate::app::models::{LocaleDefaults, CONFIG_FILE};
use crate::app::store::FileStore;
use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::Write;
use std::path::Path;

/// The stdout record, holding the lists exactly as they appear in the file.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct FileListsReport<'a> {
    words: Option<&'a Value>,
    ignore_paths: Option<&'a Value>,
}

fn append_locale(config: &mut Map<String, Value>, locale: &LocaleDefaults) -> Result<()> {
    match config.get_mut("language") {
        Some(Value::String(language)) => {
            language.push(',');
            language.push_str(&locale.locale);
        }
        Some(other) => bail!("Expected \"language\" to be a string, got {}", other),
        None => bail!("Missing \"language\""),
    }

    match config.get_mut("dictionaries") {
        Some(Value::Array(dictionaries)) => {
            dictionaries.push(Value::String(locale.dictionary.clone()));
        }
        Some(other) => bail!("Expected \"dictionaries\" to be an array, got {}", other),
        None => bail!("Missing \"dictionaries\""),
    }
    Ok(())
}

/// Appends `,<locale>` to the language and the dictionary to the
/// dictionaries of an existing `cspell.json`. Every other key is written back
/// as it was, in its original order.
///
/// Nothing checks whether the locale is already there, so running this twice
/// adds it twice.
pub fn add_locale(
    store: &dyn FileStore,
    locale: &LocaleDefaults,
    out: &mut dyn Write,
) -> Result<Map<String, Value>> {
    let path = Path::new(CONFIG_FILE);
    let content = store.read_required(path)?;
    let mut config: Map<String, Value> =
        serde_json::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))?;

    append_locale(&mut config, locale)
        .with_context(|| format!("Cannot add locale to {:?}", path))?;
    log::info!(
        "Language is now {}, dictionaries {}",
        config["language"],
        config["dictionaries"]
    );

    let report = FileListsReport {
        words: config.get("words"),
        ignore_paths: config.get("ignorePaths"),
    };
    writeln!(out, "{}", to_report_json(&report)?).context("Failed to write report")?;

    store.write(path, &to_tab_json(&config)?)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::store::MemoryStore;
    use serde_json::json;

    fn run(store: &MemoryStore) -> Result<(Map<String, Value>, String)> {
        let mut out = Vec::new();
        let config = add_locale(store, &LocaleDefaults::default(), &mut out)?;
        Ok((config, String::from_utf8(out).unwrap()))
    }

    #[test]
    fn appends_locale_and_dictionary() {
        let store = MemoryStore::new().with_file(
            "cspell.json",
            r#"{"language": "en", "dictionaries": ["en_us"], "words": ["foo"], "ignorePaths": [".git"]}"#,
        );
        let (config, report) = run(&store).unwrap();

        assert_eq!(config["language"], "en,ru");
        assert_eq!(config["dictionaries"], json!(["en_us", "ru_ru"]));

        let written: Value = serde_json::from_str(&store.get("cspell.json").unwrap()).unwrap();
        assert_eq!(written["language"], "en,ru");
        assert_eq!(written["dictionaries"], json!(["en_us", "ru_ru"]));

        let report: Value = serde_json::from_str(&report).unwrap();
        assert_eq!(report, json!({"words": ["foo"], "ignorePaths": [".git"]}));
    }

    #[test]
    fn keeps_exactly_the_existing_keys_in_order() {
        let store = MemoryStore::new().with_file(
            "cspell.json",
            r#"{"$schema": "https://example.com/cspell.schema.json", "language": "en", "dictionaries": []}"#,
        );
        let (_, report) = run(&store).unwrap();

        let written = store.get("cspell.json").unwrap();
        assert_eq!(
            written,
            "{\n\t\"$schema\": \"https://example.com/cspell.schema.json\",\n\t\"language\": \"en,ru\",\n\t\"dictionaries\": [\n\t\t\"ru_ru\"\n\t]\n}"
        );

        let report: Value = serde_json::from_str(&report).unwrap();
        assert_eq!(report, json!({"words": null, "ignorePaths": null}));
    }

    #[test]
    fn loosely_typed_fields_pass_through() {
        let store = MemoryStore::new().with_file(
            "cspell.json",
            r#"{"language": "en", "minWordLength": "4", "dictionaries": [], "words": ["Foo", "foo"]}"#,
        );
        run(&store).unwrap();

        let written: Value = serde_json::from_str(&store.get("cspell.json").unwrap()).unwrap();
        assert_eq!(written["minWordLength"], "4");
        assert_eq!(written["words"], json!(["Foo", "foo"]));
        assert_eq!(written["language"], "en,ru");
    }

    #[test]
    fn rerun_duplicates_the_locale() {
        let store = MemoryStore::new()
            .with_file("cspell.json", r#"{"language": "en", "dictionaries": []}"#);
        run(&store).unwrap();
        let (config, _) = run(&store).unwrap();

        assert_eq!(config["language"], "en,ru,ru");
        assert_eq!(config["dictionaries"], json!(["ru_ru", "ru_ru"]));
    }

    #[test]
    fn custom_locale() {
        let store = MemoryStore::new()
            .with_file("cspell.json", r#"{"language": "en", "dictionaries": ["en_us"]}"#);
        let locale = LocaleDefaults {
            locale: "de".into(),
            dictionary: "de_de".into(),
        };
        let mut out = Vec::new();
        let config = add_locale(&store, &locale, &mut out).unwrap();

        assert_eq!(config["language"], "en,de");
        assert_eq!(config["dictionaries"], json!(["en_us", "de_de"]));
    }

    #[test]
    fn missing_or_mistyped_fields_are_errors() {
        for content in [
            r#"{"dictionaries": []}"#,
            r#"{"language": "en"}"#,
            r#"{"language": ["en"], "dictionaries": []}"#,
            r#"{"language": "en", "dictionaries": "en_us"}"#,
        ] {
            let store = MemoryStore::new().with_file("cspell.json", content);
            assert!(run(&store).is_err(), "accepted {}", content);
            assert!(store.writes().is_empty());
        }
    }

    #[test]
    fn missing_config_is_an_error() {
        let store = MemoryStore::new();
        assert!(run(&store).is_err());
        assert!(store.writes().is_empty());
    }

    #[test]
    fn malformed_config_is_an_error() {
        let store = MemoryStore::new().with_file("cspell.json", "{\"language\": ");
        assert!(run(&store).is_err());
        assert!(store.writes().is_empty());
    }
}
