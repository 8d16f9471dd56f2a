//! Template filling
//!
//! Substitutes a data record into a template. Values are stringified by
//! kind: sequences become bullet blocks, mappings become nested bullet
//! blocks, null becomes [`NOT_SPECIFIED`], and everything else is used as
//! its display string.
//!
//! Substitution is a direct text replace per key, applied in the record's
//! insertion order. A value whose display text contains another key's
//! placeholder is therefore substituted again if that key comes later,
//! and left alone if it came earlier.

use chrono::{Local, NaiveDateTime};
use serde_json::{Map, Value};
use tracing::debug;

use crate::template::PLACEHOLDER;

/// Data record: placeholder identifier to value, in insertion order
pub type DataRecord = Map<String, Value>;

/// Display text for a null value
pub const NOT_SPECIFIED: &str = "Not specified";

/// Replacement for placeholders left unresolved after substitution
pub const TO_BE_FILLED: &str = "[To be filled]";

/// Key synthesized from the clock when the record lacks it
pub const GENERATION_DATE_KEY: &str = "generation_date";

/// Display format for the synthesized generation date
pub const GENERATION_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Fill `template` with `data`, stamping `generation_date` from the local clock
pub fn fill(template: &str, data: &DataRecord) -> String {
    fill_at(template, data, Local::now().naive_local())
}

/// Fill `template` with `data`, stamping `generation_date` from `now`
pub fn fill_at(template: &str, data: &DataRecord, now: NaiveDateTime) -> String {
    let mut filled = template.to_string();

    for (key, value) in data {
        filled = substitute(&filled, key, &display_value(value));
    }

    if !data.contains_key(GENERATION_DATE_KEY) {
        let stamp = now.format(GENERATION_DATE_FORMAT).to_string();
        filled = substitute(&filled, GENERATION_DATE_KEY, &stamp);
    }

    let unresolved = PLACEHOLDER.find_iter(&filled).count();
    if unresolved > 0 {
        debug!(unresolved, "Replacing unresolved placeholders");
    }
    PLACEHOLDER.replace_all(&filled, TO_BE_FILLED).into_owned()
}

fn substitute(text: &str, key: &str, replacement: &str) -> String {
    text.replace(&format!("{{{{{}}}}}", key), replacement)
}

/// Display text for a single record value
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Array(items) => bullet_block(items, ""),
        Value::Object(map) => mapping_block(map, 0),
        other => display_scalar(other),
    }
}

fn display_scalar(value: &Value) -> String {
    match value {
        Value::Null => NOT_SPECIFIED.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn bullet_block(items: &[Value], indent: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}- {}", indent, display_scalar(item)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a mapping as a nested bullet block, two spaces of indent per level
pub fn mapping_block(map: &Map<String, Value>, level: usize) -> String {
    let indent = "  ".repeat(level);
    let mut lines = Vec::new();

    for (key, value) in map {
        match value {
            Value::Object(nested) => {
                lines.push(format!("{}- **{}:**", indent, key));
                if !nested.is_empty() {
                    lines.push(mapping_block(nested, level + 1));
                }
            }
            Value::Array(items) => {
                lines.push(format!("{}- **{}:**", indent, key));
                if !items.is_empty() {
                    lines.push(bullet_block(items, &format!("{}  ", indent)));
                }
            }
            other => lines.push(format!("{}- **{}:** {}", indent, key, display_scalar(other))),
        }
    }

    lines.join("\n")
}
