use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use screw_types::PresetData;

use crate::errors::PresetError;
use crate::store::UserPreset;

/// Current preset file version.
pub const PRESET_FILE_VERSION: u32 = 1;

/// On-disk layout of the user preset file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetFile {
    pub version: u32,
    pub presets: Vec<PresetEntry>,
}

/// One named preset in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetEntry {
    pub name: String,
    pub data: PresetData,
    /// When the preset was last saved. Absent in older files.
    #[serde(default, rename = "savedAt", skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

/// Serialize user presets to pretty-printed JSON, sorted by name.
pub fn render_presets(presets: &BTreeMap<String, UserPreset>) -> Result<String, PresetError> {
    let file = PresetFile {
        version: PRESET_FILE_VERSION,
        presets: presets
            .iter()
            .map(|(name, preset)| PresetEntry {
                name: name.clone(),
                data: preset.data.clone(),
                saved_at: preset.saved_at,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&file).map_err(|e| PresetError::Serialize(e.to_string()))
}
