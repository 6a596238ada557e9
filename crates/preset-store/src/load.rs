use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use screw_types::PresetData;

use crate::errors::PresetError;
use crate::save::PRESET_FILE_VERSION;
use crate::store::{normalize_name, UserPreset};

/// Parse the user preset file.
///
/// Accepts `{"version": 1, "presets": [...]}` as well as a bare array of
/// entries. Entries that are not objects, have no usable name, or whose
/// data does not parse are skipped. Later entries win over earlier ones
/// with the same normalised name.
pub fn parse_presets(json: &str) -> Result<BTreeMap<String, UserPreset>, PresetError> {
    let raw: Value = serde_json::from_str(json).map_err(|e| PresetError::Parse(e.to_string()))?;

    let entries = match raw {
        Value::Object(mut map) => {
            if let Some(version) = map.get("version").and_then(Value::as_u64) {
                if version > u64::from(PRESET_FILE_VERSION) {
                    warn!(version, "preset file is newer than this build; reading anyway");
                }
            }
            match map.remove("presets") {
                Some(Value::Array(entries)) => entries,
                Some(_) => return Err(PresetError::Parse("\"presets\" is not an array".to_string())),
                None => Vec::new(),
            }
        }
        Value::Array(entries) => entries,
        _ => return Err(PresetError::Parse("expected an object or an array".to_string())),
    };

    let mut presets = BTreeMap::new();
    for (index, entry) in entries.into_iter().enumerate() {
        match parse_entry(entry) {
            Some((name, preset)) => {
                presets.insert(name, preset);
            }
            None => debug!(index, "skipping unusable preset entry"),
        }
    }
    Ok(presets)
}

fn parse_entry(entry: Value) -> Option<(String, UserPreset)> {
    let Value::Object(mut item) = entry else {
        return None;
    };
    let name = match item.get("name")? {
        Value::String(s) => normalize_name(s),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if name.is_empty() {
        return None;
    }
    let data = match item.remove("data")? {
        data @ Value::Object(_) => serde_json::from_value::<PresetData>(data).ok()?,
        _ => return None,
    };
    let saved_at = item
        .get("savedAt")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<DateTime<Utc>>().ok());
    Some((name, UserPreset { data, saved_at }))
}
