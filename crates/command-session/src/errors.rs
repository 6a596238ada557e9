use blade_engine::EngineError;
use preset_store::PresetError;

use crate::state::SessionState;

/// A failure reported by the host UI while registering the command.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct UiError {
    pub message: String,
}

impl UiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors surfaced to the host by a command session or the add-in.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Preset(#[from] PresetError),

    #[error("cannot {action} while the command is {state}")]
    InvalidState {
        action: &'static str,
        state: SessionState,
    },

    #[error("Add-in start failed: {0}")]
    Start(UiError),

    #[error("Add-in stop failed: {0}")]
    Stop(UiError),
}

impl SessionError {
    /// True when retrying with different inputs cannot help.
    pub fn is_fatal(&self) -> bool {
        match self {
            SessionError::Engine(e) => e.is_fatal(),
            SessionError::Preset(_) => false,
            _ => true,
        }
    }
}
