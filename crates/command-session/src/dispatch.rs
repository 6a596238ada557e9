use blade_ops::KernelBundle;

use crate::errors::SessionError;
use crate::messages::{HostToSession, SessionToHost};
use crate::session::CommandSession;

/// Dispatch a host message to the session and return the response.
///
/// Errors are converted to [`SessionToHost::Error`] with the full message
/// chain; the host shows them in a dialog.
pub fn dispatch(
    session: &mut CommandSession,
    msg: HostToSession,
    kb: &mut dyn KernelBundle,
) -> SessionToHost {
    match handle_message(session, msg, kb) {
        Ok(response) => response,
        Err(e) => SessionToHost::Error {
            message: e.to_string(),
            fatal: e.is_fatal(),
        },
    }
}

fn handle_message(
    session: &mut CommandSession,
    msg: HostToSession,
    kb: &mut dyn KernelBundle,
) -> Result<SessionToHost, SessionError> {
    match msg {
        // -- Form --
        HostToSession::InputChanged { change } => {
            session.input_changed(kb.as_introspect(), change)?;
            Ok(SessionToHost::FormUpdated {
                view: session.view(),
            })
        }

        // -- Command events --
        HostToSession::ValidateInputs => Ok(SessionToHost::InputsValidated {
            valid: session.validate(kb.as_introspect()),
        }),

        HostToSession::Preview => {
            let valid = session.preview(kb)?;
            Ok(SessionToHost::PreviewBuilt { valid })
        }

        HostToSession::Execute => {
            let out = session.execute(kb)?;
            Ok(SessionToHost::BladeCreated {
                name: out.name,
                body: out.body,
                flights: out.flights.len(),
                joined_to_shaft: out.joined_to_shaft,
            })
        }

        HostToSession::Cancel => {
            session.close();
            Ok(SessionToHost::Closed)
        }
    }
}

/// Parse a JSON host message, dispatch it, and render the response as JSON.
pub fn dispatch_json(
    session: &mut CommandSession,
    json: &str,
    kb: &mut dyn KernelBundle,
) -> Result<String, serde_json::Error> {
    let msg: HostToSession = serde_json::from_str(json)?;
    let response = dispatch(session, msg, kb);
    serde_json::to_string(&response)
}
