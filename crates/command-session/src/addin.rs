//! Add-in lifecycle: command registration and the state that outlives a
//! single command.

use std::path::PathBuf;

use tracing::{debug, info};

use blade_engine::Engine;
use blade_ops::{BuildConfig, HelixBuilder};
use preset_store::PresetStore;

use crate::errors::{SessionError, UiError};
use crate::session::CommandSession;

pub const CMD_ID: &str = "archimedean_screw_blade_generator_cmd_v3";
pub const CMD_NAME: &str = "Archimedean Screw Blade";
pub const CMD_DESCRIPTION: &str =
    "Create a configurable hydraulic Archimedean screw flight around an existing shaft.";
pub const WORKSPACE_ID: &str = "FusionSolidEnvironment";
pub const PANEL_ID: &str = "SolidCreatePanel";

/// Button registration request handed to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl CommandDefinition {
    pub fn blade_command() -> Self {
        Self {
            id: CMD_ID.to_string(),
            name: CMD_NAME.to_string(),
            description: CMD_DESCRIPTION.to_string(),
        }
    }
}

/// The slice of the host user interface the add-in registers itself with.
pub trait HostUi {
    /// True when a command definition with `id` exists.
    fn command_definition(&self, id: &str) -> bool;

    fn add_button_definition(&mut self, definition: &CommandDefinition) -> Result<(), UiError>;

    fn panel_has_control(&self, workspace: &str, panel: &str, id: &str) -> bool;

    /// Add a promoted control for command `id` to a toolbar panel.
    fn add_panel_control(&mut self, workspace: &str, panel: &str, id: &str) -> Result<(), UiError>;

    fn remove_panel_control(&mut self, workspace: &str, panel: &str, id: &str) -> Result<(), UiError>;

    fn remove_command_definition(&mut self, id: &str) -> Result<(), UiError>;
}

/// The add-in: registers the blade command and opens a [`CommandSession`]
/// each time the user runs it.
///
/// The helix sign convention detected during one command is kept for the
/// next and forgotten on [`AddIn::stop`].
#[derive(Debug, Clone)]
pub struct AddIn {
    preset_path: PathBuf,
    config: BuildConfig,
    helix: HelixBuilder,
}

impl AddIn {
    pub fn new(preset_path: impl Into<PathBuf>) -> Self {
        Self {
            preset_path: preset_path.into(),
            config: BuildConfig::default(),
            helix: HelixBuilder::new(),
        }
    }

    /// An add-in whose commands build with `config`.
    pub fn with_config(preset_path: impl Into<PathBuf>, config: BuildConfig) -> Result<Self, SessionError> {
        Engine::with_config(config)?;
        Ok(Self {
            config,
            ..Self::new(preset_path)
        })
    }

    pub fn helix(&self) -> &HelixBuilder {
        &self.helix
    }

    /// Register the command and its toolbar button. Does nothing if the
    /// command is already registered.
    pub fn start(&mut self, ui: &mut dyn HostUi) -> Result<(), SessionError> {
        if ui.command_definition(CMD_ID) {
            debug!("blade command already registered");
            return Ok(());
        }
        ui.add_button_definition(&CommandDefinition::blade_command())
            .map_err(SessionError::Start)?;
        if !ui.panel_has_control(WORKSPACE_ID, PANEL_ID, CMD_ID) {
            ui.add_panel_control(WORKSPACE_ID, PANEL_ID, CMD_ID)
                .map_err(SessionError::Start)?;
        }
        info!(command = CMD_ID, "add-in started");
        Ok(())
    }

    /// Remove whatever `start` registered and forget the helix convention.
    pub fn stop(&mut self, ui: &mut dyn HostUi) -> Result<(), SessionError> {
        self.helix.reset();
        if ui.panel_has_control(WORKSPACE_ID, PANEL_ID, CMD_ID) {
            ui.remove_panel_control(WORKSPACE_ID, PANEL_ID, CMD_ID)
                .map_err(SessionError::Stop)?;
        }
        if ui.command_definition(CMD_ID) {
            ui.remove_command_definition(CMD_ID)
                .map_err(SessionError::Stop)?;
        }
        info!(command = CMD_ID, "add-in stopped");
        Ok(())
    }

    /// Open a fresh command session. User presets are re-read from disk.
    pub fn open_session(&self) -> Result<CommandSession, SessionError> {
        let engine = Engine::with_config(self.config)?.with_helix(self.helix.clone());
        let presets = PresetStore::open(&self.preset_path);
        Ok(CommandSession::new(engine, presets))
    }

    /// Close `session` and keep the helix convention it detected.
    pub fn close_session(&mut self, session: &mut CommandSession) {
        session.close();
        if let Some(mode) = session.engine().helix().mode() {
            self.helix = HelixBuilder::with_mode(mode);
        }
    }
}
