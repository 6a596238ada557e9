use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use screw_types::PresetData;

use crate::builtin::{builtin_preset, builtin_presets};
use crate::errors::PresetError;
use crate::load::parse_presets;
use crate::save::render_presets;

/// Dropdown entry that keeps the current form values.
pub const MANUAL_LABEL: &str = "Manual (current values)";
pub const BUILTIN_PREFIX: &str = "Built-in: ";
pub const USER_PREFIX: &str = "User: ";

/// Trim and collapse internal whitespace runs to single spaces.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A preset saved by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct UserPreset {
    pub data: PresetData,
    pub saved_at: Option<DateTime<Utc>>,
}

/// Which preset a dropdown label refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetSelection {
    Manual,
    Builtin(String),
    User(String),
}

impl PresetSelection {
    pub fn from_label(label: &str) -> Self {
        if let Some(name) = label.strip_prefix(BUILTIN_PREFIX) {
            PresetSelection::Builtin(name.to_string())
        } else if let Some(name) = label.strip_prefix(USER_PREFIX) {
            PresetSelection::User(name.to_string())
        } else {
            PresetSelection::Manual
        }
    }

    pub fn label(&self) -> String {
        match self {
            PresetSelection::Manual => MANUAL_LABEL.to_string(),
            PresetSelection::Builtin(name) => format!("{BUILTIN_PREFIX}{name}"),
            PresetSelection::User(name) => format!("{USER_PREFIX}{name}"),
        }
    }
}

/// Built-in presets plus the user presets backed by a JSON file.
#[derive(Debug, Clone)]
pub struct PresetStore {
    path: PathBuf,
    user: BTreeMap<String, UserPreset>,
}

impl PresetStore {
    /// Open the store at `path`, loading any user presets in it.
    ///
    /// A missing or unreadable file yields an empty user tier.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = Self {
            path: path.into(),
            user: BTreeMap::new(),
        };
        if let Err(e) = store.reload() {
            warn!(path = %store.path.display(), error = %e, "ignoring preset file");
        }
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the user presets from disk. On error the user tier is empty.
    pub fn reload(&mut self) -> Result<(), PresetError> {
        self.user.clear();
        if !self.path.exists() {
            return Ok(());
        }
        let json = fs::read_to_string(&self.path).map_err(|e| PresetError::Read {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        self.user = parse_presets(&json)?;
        info!(count = self.user.len(), "user presets loaded");
        Ok(())
    }

    /// Store `data` under the normalised `name` and rewrite the file.
    /// Returns the normalised name.
    pub fn save(&mut self, name: &str, data: PresetData) -> Result<String, PresetError> {
        let name = normalize_name(name);
        if name.is_empty() {
            return Err(PresetError::EmptyName);
        }
        self.user.insert(
            name.clone(),
            UserPreset {
                data,
                saved_at: Some(Utc::now()),
            },
        );
        let json = render_presets(&self.user)?;
        fs::write(&self.path, json).map_err(|e| PresetError::Write {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        info!(%name, "preset saved");
        Ok(name)
    }

    pub fn user_preset(&self, name: &str) -> Option<&UserPreset> {
        self.user.get(name)
    }

    /// User preset names, sorted.
    pub fn user_names(&self) -> Vec<&str> {
        self.user.keys().map(String::as_str).collect()
    }

    /// Preset payload for a selection. `Manual` has none.
    pub fn lookup(&self, selection: &PresetSelection) -> Option<PresetData> {
        match selection {
            PresetSelection::Manual => None,
            PresetSelection::Builtin(name) => builtin_preset(name),
            PresetSelection::User(name) => self.user.get(name).map(|p| p.data.clone()),
        }
    }

    /// Labels for the preset dropdown: manual, built-ins, then user presets.
    pub fn dropdown_labels(&self) -> Vec<String> {
        let mut builtin: Vec<_> = builtin_presets().into_iter().map(|(n, _)| n).collect();
        builtin.sort_unstable();
        std::iter::once(MANUAL_LABEL.to_string())
            .chain(builtin.into_iter().map(|n| format!("{BUILTIN_PREFIX}{n}")))
            .chain(self.user.keys().map(|n| format!("{USER_PREFIX}{n}")))
            .collect()
    }
}
