//! Inbound message envelopes from the streaming connection.
//!
//! Each frame is a JSON object tagged by a `type` string. Types this client
//! does not recognize must be ignored, not rejected: they decode to
//! [`ServerEvent::Unknown`] via `#[serde(other)]` so a newer backend never
//! breaks an older client.

use serde::{Deserialize, Serialize};
use tether_core::SessionId;

use crate::model::{Step, StepUpdate};

/// One inbound envelope from the agent backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    /// The backend assigned a session id to this connection.
    SessionCreated {
        /// Server-assigned session id.
        session_id: SessionId,
    },

    /// A new screenshot frame of the controlled browser.
    Screenshot {
        /// Opaque image payload (latest frame only).
        image: String,
        /// Page address at capture time, if known.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },

    /// Progress on one step of the running task.
    StepUpdate {
        /// Partial step record to merge into the timeline.
        step: StepUpdate,
        /// Live-view address, redundantly attached by some backends.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        live_url: Option<String>,
    },

    /// The agent accepted a task and produced its initial plan.
    TaskStarted {
        /// Short task name.
        #[serde(default)]
        task_name: String,
        /// One-paragraph task summary.
        #[serde(default)]
        task_summary: String,
        /// Agreed completion criteria.
        #[serde(default)]
        definition_of_done: String,
        /// Initial step list (full replacement of the timeline).
        #[serde(default)]
        steps: Vec<Step>,
    },

    /// The agent believes the task is done and awaits confirmation.
    TaskComplete,

    /// The controlled browser navigated.
    UrlChanged {
        /// New page address.
        url: String,
    },

    /// Navigation started or settled.
    Loading {
        /// Whether navigation is in flight.
        is_loading: bool,
    },

    /// Input authority changed hands.
    InterventionStatus {
        /// True while the human holds the input channel.
        is_user_controlled: bool,
    },

    /// The backend published an embeddable live view.
    LiveUrl {
        /// Live-view address.
        live_url: String,
    },

    /// The agent reported an unrecoverable task failure.
    TaskError {
        /// Human-readable failure description, if provided.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Any type string this client does not recognize.
    #[serde(other)]
    Unknown,
}

impl ServerEvent {
    /// Stable name of the event kind, for logging and diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SessionCreated { .. } => "session_created",
            Self::Screenshot { .. } => "screenshot",
            Self::StepUpdate { .. } => "step_update",
            Self::TaskStarted { .. } => "task_started",
            Self::TaskComplete => "task_complete",
            Self::UrlChanged { .. } => "url_changed",
            Self::Loading { .. } => "loading",
            Self::InterventionStatus { .. } => "intervention_status",
            Self::LiveUrl { .. } => "live_url",
            Self::TaskError { .. } => "task_error",
            Self::Unknown => "unknown",
        }
    }
}
