//! Session facade: the single surface the presentation layer talks to.
//!
//! Owns the connection manager, command sender, and HTTP client explicitly —
//! there is no ambient global transport handle. Exposes a consistent
//! [`Snapshot`] and the full command set.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use tether_core::{TetherError, TetherSettings};
use tether_protocol::{BrowserAction, SessionStatus};

use crate::api::{ApiClient, ChatReply};
use crate::commands::CommandSender;
use crate::connection::ConnectionManager;
use crate::state::{self, SharedState, Snapshot};
use crate::viewport::{ContainTransform, NativeSize};

/// One client-side agent session: state sync plus intent forwarding.
pub struct AgentSession {
    pub(crate) state: SharedState,
    conn: Arc<ConnectionManager>,
    commands: CommandSender,
    api: ApiClient,
}

impl AgentSession {
    /// Build a session from settings. Call [`connect`](Self::connect) to
    /// open the streaming connection.
    #[must_use]
    pub fn new(settings: &TetherSettings) -> Self {
        let state = state::shared();
        let conn = ConnectionManager::new(
            format!("{}/ws/agent", settings.ws_url),
            Duration::from_millis(settings.reconnect_delay_ms),
            state.clone(),
        );
        let commands = CommandSender::new(conn.clone(), state.clone());
        let api = ApiClient::new(settings.api_url.clone());
        Self {
            state,
            conn,
            commands,
            api,
        }
    }

    /// Open the streaming connection (idempotent).
    pub fn connect(&self) {
        self.conn.connect();
    }

    /// Tear down: close the connection and disarm the reconnect. Results of
    /// in-flight synchronous requests arriving after this are ignored by
    /// their callers.
    pub fn close(&self) {
        self.conn.close();
    }

    /// Whether the streaming connection is currently open.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.conn.is_connected()
    }

    /// A consistent point-in-time view of session, timeline, and browser
    /// state, with display statuses derived on read.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, self.conn.is_connected())
    }

    fn current_session_id(&self) -> Result<tether_core::SessionId, TetherError> {
        self.state
            .read()
            .session
            .as_ref()
            .map(|s| s.id.clone())
            .ok_or(TetherError::NoSession)
    }

    /// Send a chat message; returns the clarification question or the
    /// signal to begin execution. One round trip, failures propagate.
    pub async fn send_message(&self, text: &str) -> Result<ChatReply, TetherError> {
        let session_id = self.current_session_id()?;
        Ok(self.api.send_message(&session_id, text).await?)
    }

    /// Confirm the task completed successfully; on acceptance the local
    /// status becomes `complete`. Safe to call twice — it is a terminal
    /// assignment, not an increment.
    pub async fn confirm_complete(&self) -> Result<(), TetherError> {
        let session_id = self.current_session_id()?;
        self.api.confirm_complete(&session_id).await?;
        if let Some(session) = &mut self.state.write().session {
            session.status = SessionStatus::Complete;
        }
        Ok(())
    }

    /// Begin executing a task; the payload is forwarded verbatim.
    pub fn start_task(&self, task: Value) -> bool {
        self.commands.start_task(task)
    }

    /// Take input authority from the agent.
    pub fn take_control(&self) -> bool {
        self.commands.take_control()
    }

    /// Return input authority to the agent.
    pub fn hand_back_control(&self) -> bool {
        self.commands.hand_back_control()
    }

    /// Forward a browser input (click, type, or scroll) at native
    /// coordinates. Not gated on the local control flag; the server is the
    /// authority.
    pub fn send_browser_action(&self, action: BrowserAction) -> bool {
        self.commands.browser_action(action)
    }

    /// Map a pointer position on the displayed frame to native coordinates
    /// and forward it as a click. Clicks in the letterbox padding are
    /// silently dropped. Call only while the human holds control.
    ///
    /// `native` is the frame's native size, or `None` before the first
    /// frame has reported one (defaults apply).
    pub fn click_at(
        &self,
        display_width: f64,
        display_height: f64,
        pointer_x: f64,
        pointer_y: f64,
        native: Option<NativeSize>,
    ) -> bool {
        let transform =
            ContainTransform::new(display_width, display_height, native.unwrap_or_default());
        let Some(point) = transform.map(pointer_x, pointer_y) else {
            debug!(pointer_x, pointer_y, "pointer in letterbox padding, click dropped");
            return false;
        };
        self.commands.browser_action(BrowserAction::Click {
            x: point.x,
            y: point.y,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tether_protocol::Session;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings_for(server: &MockServer) -> TetherSettings {
        TetherSettings {
            api_url: server.uri(),
            ws_url: "ws://127.0.0.1:1".into(),
            reconnect_delay_ms: 50,
        }
    }

    fn seed_session(session: &AgentSession, status: SessionStatus) {
        let mut record = Session::idle("sess_1".into());
        record.status = status;
        session.state.write().session = Some(record);
    }

    #[tokio::test]
    async fn confirm_complete_sets_terminal_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/confirm"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let agent = AgentSession::new(&settings_for(&server));
        seed_session(&agent, SessionStatus::Waiting);

        agent.confirm_complete().await.unwrap();
        assert_eq!(
            agent.snapshot().session.unwrap().status,
            SessionStatus::Complete
        );

        // Second call is safe: terminal assignment, not an increment
        agent.confirm_complete().await.unwrap();
        assert_eq!(
            agent.snapshot().session.unwrap().status,
            SessionStatus::Complete
        );
    }

    #[tokio::test]
    async fn confirm_failure_leaves_status_untouched() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/confirm"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let agent = AgentSession::new(&settings_for(&server));
        seed_session(&agent, SessionStatus::Waiting);

        let err = agent.confirm_complete().await.unwrap_err();
        assert_matches!(err, TetherError::Api(_));
        assert_eq!(
            agent.snapshot().session.unwrap().status,
            SessionStatus::Waiting
        );
    }

    #[tokio::test]
    async fn requests_without_session_fail_fast() {
        let server = MockServer::start().await;
        let agent = AgentSession::new(&settings_for(&server));
        assert_matches!(
            agent.send_message("hi").await.unwrap_err(),
            TetherError::NoSession
        );
        assert_matches!(
            agent.confirm_complete().await.unwrap_err(),
            TetherError::NoSession
        );
    }

    #[tokio::test]
    async fn click_in_letterbox_sends_nothing() {
        let server = MockServer::start().await;
        let agent = AgentSession::new(&settings_for(&server));
        seed_session(&agent, SessionStatus::Running);
        // (0,0) on a 1280x800 frame in an 800x800 box is padding
        assert!(!agent.click_at(800.0, 800.0, 0.0, 0.0, None));
    }

    #[tokio::test]
    async fn snapshot_reports_disconnected_before_connect() {
        let server = MockServer::start().await;
        let agent = AgentSession::new(&settings_for(&server));
        let snap = agent.snapshot();
        assert!(!snap.connected);
        assert!(snap.session.is_none());
        assert!(snap.steps.is_empty());
    }
}
