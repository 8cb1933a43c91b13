use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Pretty-prints `value` as JSON indented with tabs, without a trailing newline.
pub fn to_tab_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"\t");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .context("Failed to serialize JSON")?;
    String::from_utf8(buf).context("Serialized JSON is not valid UTF-8")
}

/// Renders the record printed to stdout (two-space indent, like a console dump).
pub fn to_report_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize report")
}
