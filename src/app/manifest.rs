use anyhow::{bail, Result};
use serde_json::{Map, Value};

/// Registers `name -> command` as the first entry of `scripts` unless a script
/// with that name already exists. Returns whether the manifest changed.
pub fn ensure_script(manifest: &mut Map<String, Value>, name: &str, command: &str) -> Result<bool> {
    let existing = match manifest.get_mut("scripts") {
        None => None,
        Some(Value::Object(scripts)) => {
            if scripts.contains_key(name) {
                return Ok(false);
            }
            Some(std::mem::take(scripts))
        }
        Some(other) => bail!("Expected \"scripts\" to be an object, got {}", other),
    };

    let mut scripts = Map::new();
    scripts.insert(name.to_string(), Value::String(command.to_string()));
    scripts.extend(existing.unwrap_or_default());

    manifest.insert("scripts".to_string(), Value::Object(scripts));
    Ok(true)
}
