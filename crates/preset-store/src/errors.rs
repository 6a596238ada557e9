/// Errors reading or writing the user preset file.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PresetError {
    #[error("enter a preset name.")]
    EmptyName,

    #[error("failed to parse preset file: {0}")]
    Parse(String),

    #[error("failed to serialize presets: {0}")]
    Serialize(String),

    #[error("could not write {path}: {reason}")]
    Write { path: String, reason: String },

    #[error("could not read {path}: {reason}")]
    Read { path: String, reason: String },
}
