use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of one open blade command.
///
/// ```text
/// Configuring <-> Previewing
///      ^  \             /
///      |   +-> Executing -> Closed
///      +-------- (failed)
/// ```
///
/// Any state may close directly (cancel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Configuring,
    Previewing,
    Executing,
    Closed,
}

impl SessionState {
    pub fn can_transition(self, to: SessionState) -> bool {
        use SessionState::*;
        match (self, to) {
            (Closed, _) => false,
            (_, Closed) => true,
            (Configuring | Previewing, Configuring | Previewing | Executing) => true,
            (Executing, Configuring) => true,
            _ => false,
        }
    }

    /// Move to `to`, or report the action that was attempted from the wrong
    /// state.
    pub fn advance(&mut self, to: SessionState, action: &'static str) -> Result<(), crate::SessionError> {
        if !self.can_transition(to) {
            return Err(crate::SessionError::InvalidState { action, state: *self });
        }
        *self = to;
        Ok(())
    }

    /// True while the form accepts edits.
    pub fn is_open(self) -> bool {
        matches!(self, SessionState::Configuring | SessionState::Previewing)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Configuring => "configuring",
            SessionState::Previewing => "previewing",
            SessionState::Executing => "executing",
            SessionState::Closed => "closed",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_is_terminal() {
        for to in [
            SessionState::Configuring,
            SessionState::Previewing,
            SessionState::Executing,
            SessionState::Closed,
        ] {
            assert!(!SessionState::Closed.can_transition(to));
        }
    }

    #[test]
    fn executing_closes_or_falls_back_to_configuring() {
        assert!(SessionState::Executing.can_transition(SessionState::Closed));
        assert!(SessionState::Executing.can_transition(SessionState::Configuring));
        assert!(!SessionState::Executing.can_transition(SessionState::Previewing));
        assert!(!SessionState::Executing.can_transition(SessionState::Executing));
    }

    #[test]
    fn advance_reports_action_and_state() {
        let mut state = SessionState::Closed;
        let err = state.advance(SessionState::Previewing, "preview").unwrap_err();
        assert_eq!(err.to_string(), "cannot preview while the command is closed");
        assert_eq!(state, SessionState::Closed);
    }
}
