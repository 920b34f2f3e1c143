//! The two synchronous request/response calls that do not ride the
//! streaming connection: chat clarification and completion confirmation.
//!
//! Single round trips with no retry; failures propagate to the caller as
//! [`ApiError`]. Nothing here touches the shared state — the facade decides
//! what a successful confirmation means for the session slice.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use tether_core::SessionId;
use tether_core::errors::ApiError;

/// Reply from `POST /api/chat`.
///
/// Either a clarification question (continue the conversation) or the
/// signal to begin execution with an attached task payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatReply {
    /// The agent needs another answer before it can plan the task.
    pub needs_follow_up: bool,
    /// The clarification question, when follow-up is needed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    /// The agent is ready; start execution.
    pub start_execution: bool,
    /// Task payload to forward verbatim via `start_task`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_data: Option<Value>,
}

/// Client for the HTTP request endpoints.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Send a chat message for the session; single round trip, no retry.
    pub async fn send_message(
        &self,
        session_id: &SessionId,
        message: &str,
    ) -> Result<ChatReply, ApiError> {
        const ENDPOINT: &str = "/api/chat";
        let response = self
            .http
            .post(format!("{}{ENDPOINT}", self.base_url))
            .json(&serde_json::json!({
                "sessionId": session_id,
                "message": message,
            }))
            .send()
            .await
            .map_err(|e| ApiError::transport(ENDPOINT, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::status(ENDPOINT, status.as_u16()));
        }
        response
            .json::<ChatReply>()
            .await
            .map_err(|e| ApiError::decode(ENDPOINT, e))
    }

    /// Post a success confirmation for the session; 2xx means accepted.
    pub async fn confirm_complete(&self, session_id: &SessionId) -> Result<(), ApiError> {
        const ENDPOINT: &str = "/api/confirm";
        let response = self
            .http
            .post(format!("{}{ENDPOINT}", self.base_url))
            .json(&serde_json::json!({
                "sessionId": session_id,
                "success": true,
            }))
            .send()
            .await
            .map_err(|e| ApiError::transport(ENDPOINT, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::status(ENDPOINT, status.as_u16()));
        }
        Ok(())
    }
}
