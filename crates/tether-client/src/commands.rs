//! Outbound intent sender.
//!
//! Tags every command with the current session id and writes it to the
//! active connection. Deliberately does *not* check `is_user_controlled`
//! before forwarding browser actions: the flag in local state can be stale,
//! and authority is enforced server-side. Sending while disconnected (or
//! before a session exists) drops the command silently.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use tether_core::SessionId;
use tether_protocol::{BrowserAction, ClientCommand, InterventionAction};

use crate::connection::ConnectionManager;
use crate::state::SharedState;

/// Serializes user intents onto the streaming connection.
pub struct CommandSender {
    conn: Arc<ConnectionManager>,
    state: SharedState,
}

impl CommandSender {
    /// Create a sender bound to a connection and the shared state.
    #[must_use]
    pub fn new(conn: Arc<ConnectionManager>, state: SharedState) -> Self {
        Self { conn, state }
    }

    fn session_id(&self) -> Option<SessionId> {
        self.state.read().session.as_ref().map(|s| s.id.clone())
    }

    fn send(&self, build: impl FnOnce(SessionId) -> ClientCommand) -> bool {
        let Some(session_id) = self.session_id() else {
            debug!("no session yet, dropping command");
            return false;
        };
        self.conn.send_command(&build(session_id))
    }

    /// Begin executing a task; the payload is forwarded verbatim.
    pub fn start_task(&self, task: Value) -> bool {
        self.send(|session_id| ClientCommand::StartTask { session_id, task })
    }

    /// Human takes the input channel.
    pub fn take_control(&self) -> bool {
        self.send(|session_id| ClientCommand::Intervention {
            session_id,
            action: InterventionAction::TakeControl,
        })
    }

    /// Human returns the input channel to the agent.
    pub fn hand_back_control(&self) -> bool {
        self.send(|session_id| ClientCommand::Intervention {
            session_id,
            action: InterventionAction::HandBack,
        })
    }

    /// Forward a browser input (click, type, or scroll).
    pub fn browser_action(&self, action: BrowserAction) -> bool {
        self.send(|session_id| ClientCommand::BrowserAction { session_id, action })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tether_protocol::Session;

    fn sender_without_connection() -> CommandSender {
        let state = crate::state::shared();
        state.write().session = Some(Session::idle("sess_1".into()));
        let conn = ConnectionManager::new(
            "ws://127.0.0.1:1/ws/agent".into(),
            Duration::from_millis(50),
            state.clone(),
        );
        CommandSender::new(conn, state)
    }

    #[test]
    fn commands_without_connection_are_dropped() {
        let sender = sender_without_connection();
        assert!(!sender.take_control());
        assert!(!sender.hand_back_control());
        assert!(!sender.browser_action(BrowserAction::Click { x: 1, y: 2 }));
        assert!(!sender.start_task(serde_json::json!({"taskName": "t"})));
    }

    #[test]
    fn commands_without_session_are_dropped() {
        let state = crate::state::shared();
        let conn = ConnectionManager::new(
            "ws://127.0.0.1:1/ws/agent".into(),
            Duration::from_millis(50),
            state.clone(),
        );
        let sender = CommandSender::new(conn, state);
        assert!(!sender.take_control());
    }
}
