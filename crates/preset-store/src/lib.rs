pub mod builtin;
pub mod errors;
pub mod load;
pub mod save;
pub mod store;

pub use builtin::{builtin_preset, builtin_presets};
pub use errors::PresetError;
pub use load::parse_presets;
pub use save::{render_presets, PresetEntry, PresetFile, PRESET_FILE_VERSION};
pub use store::{
    normalize_name, PresetSelection, PresetStore, UserPreset, BUILTIN_PREFIX, MANUAL_LABEL,
    USER_PREFIX,
};
