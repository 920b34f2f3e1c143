//! Domain model: the three state slices the client keeps consistent.
//!
//! Wire format matches the agent backend exactly (camelCase fields).

use serde::{Deserialize, Serialize};
use tether_core::SessionId;

// ─────────────────────────────────────────────────────────────────────────────
// Session
// ─────────────────────────────────────────────────────────────────────────────

/// Lifecycle status of a session.
///
/// One-directional: `idle → running → waiting → complete`. `Error` is
/// reachable from any state on an agent-reported failure. A fresh
/// `session_created` resets to `Idle` regardless of prior state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Connected, no task started.
    #[default]
    Idle,
    /// The agent is executing a task.
    Running,
    /// The agent finished and awaits human confirmation.
    Waiting,
    /// The human confirmed completion (terminal).
    Complete,
    /// The agent reported a failure.
    Error,
}

/// Identity and lifecycle of one agent run.
///
/// Created on `session_created`; descriptive fields are filled in
/// progressively by `task_started` and intervention events. Never deleted,
/// only superseded by a new `Session` on reconnect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Server-assigned identifier.
    pub id: SessionId,
    /// Lifecycle status.
    pub status: SessionStatus,
    /// Short task name, empty until a task starts.
    pub task_name: String,
    /// One-paragraph task summary, empty until a task starts.
    pub task_summary: String,
    /// The agreed completion criteria, empty until a task starts.
    pub definition_of_done: String,
    /// True while the human has taken the input channel.
    pub is_user_controlled: bool,
}

impl Session {
    /// Fresh idle session for a newly assigned id.
    #[must_use]
    pub fn idle(id: SessionId) -> Self {
        Self {
            id,
            status: SessionStatus::Idle,
            task_name: String::new(),
            task_summary: String::new(),
            definition_of_done: String::new(),
            is_user_controlled: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Step
// ─────────────────────────────────────────────────────────────────────────────

/// Raw server-reported status of a step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Not started yet.
    #[default]
    Pending,
    /// Currently executing.
    Running,
    /// Finished successfully.
    Complete,
    /// Failed.
    Error,
}

/// One unit of agent progress, keyed by a stable id within a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Stable identifier, unique within a session.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Server-reported raw status.
    #[serde(default)]
    pub status: StepStatus,
    /// Optional server timestamp, kept opaque.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Partial step carried by `step_update`.
///
/// Fields the server omits are retained from the existing timeline entry
/// (field-wise shallow merge); only the id is mandatory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepUpdate {
    /// Stable identifier, unique within a session.
    pub id: String,
    /// Replacement name, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement description, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replacement status, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StepStatus>,
    /// Replacement timestamp, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl StepUpdate {
    /// Merge present fields into an existing step, preserving the rest.
    pub fn apply_to(&self, step: &mut Step) {
        if let Some(name) = &self.name {
            step.name = name.clone();
        }
        if let Some(description) = &self.description {
            step.description = description.clone();
        }
        if let Some(status) = self.status {
            step.status = status;
        }
        if let Some(timestamp) = &self.timestamp {
            step.timestamp = Some(timestamp.clone());
        }
    }

    /// Materialize a full step for a first-seen id; absent fields default.
    #[must_use]
    pub fn into_step(self) -> Step {
        Step {
            id: self.id,
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            timestamp: self.timestamp,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// BrowserState
// ─────────────────────────────────────────────────────────────────────────────

/// Current visual/navigational state of the controlled browser.
///
/// `live_url` and `screenshot` are independent truths: setting one never
/// clears the other, and neither is inferred from the other. Which one to
/// render is the presentation layer's decision.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserState {
    /// Last known address.
    #[serde(default)]
    pub url: String,
    /// Latest screenshot frame, if any (latest only, never buffered).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
    /// Navigation-in-flight flag.
    #[serde(default)]
    pub is_loading: bool,
    /// Address of an embeddable live view, if the backend provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
}
