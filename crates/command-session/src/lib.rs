//! Command session for the Archimedean screw blade generator.
//!
//! Owns the per-command state the host form needs (linked controls,
//! preset handling, the configure/preview/execute state machine) and the
//! add-in lifecycle around it.

pub mod addin;
pub mod controls;
pub mod dispatch;
pub mod errors;
pub mod logging;
pub mod messages;
pub mod session;
pub mod state;

pub use addin::{AddIn, CommandDefinition, HostUi, CMD_ID, PANEL_ID, WORKSPACE_ID};
pub use controls::{suggested_outer_radius, LinkedControls, Visibility};
pub use dispatch::{dispatch, dispatch_json};
pub use errors::{SessionError, UiError};
pub use logging::init_logging;
pub use messages::{FormView, HostToSession, InputChange, SessionToHost};
pub use session::CommandSession;
pub use state::SessionState;
