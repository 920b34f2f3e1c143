//! Shared client state and the snapshot exposed to the presentation layer.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tether_protocol::{BrowserState, Session, Step, StepStatus};

use crate::timeline;

/// The three state slices, reduced by the event dispatcher.
///
/// Single-writer: only the dispatcher mutates this (one message at a time);
/// everything else reads snapshots.
#[derive(Clone, Debug, Default)]
pub struct ClientState {
    /// Current session, absent until the first `session_created`.
    pub session: Option<Session>,
    /// Step timeline in insertion order, never re-sorted.
    pub steps: Vec<Step>,
    /// Current browser view state.
    pub browser: BrowserState,
    /// Kind of the most recently applied event, for diagnostics.
    pub last_event_kind: Option<&'static str>,
    /// Total events applied (including unknown kinds).
    pub events_seen: u64,
}

/// Handle to the state shared between the connection task and readers.
pub type SharedState = Arc<RwLock<ClientState>>;

/// Create a fresh shared state.
#[must_use]
pub fn shared() -> SharedState {
    Arc::new(RwLock::new(ClientState::default()))
}

/// A consistent point-in-time view of the client state.
///
/// Display statuses are derived on read, never stored, so they can never
/// diverge from the raw timeline.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Current session, if one has been created.
    pub session: Option<Session>,
    /// Step timeline as reported.
    pub steps: Vec<Step>,
    /// Per-step display status (same order as `steps`).
    pub display_statuses: Vec<StepStatus>,
    /// Browser view state.
    pub browser: BrowserState,
    /// Whether the streaming connection is currently open.
    pub connected: bool,
    /// Kind of the most recently applied event.
    pub last_event_kind: Option<&'static str>,
    /// Total events applied.
    pub events_seen: u64,
}

impl Snapshot {
    /// Capture a snapshot of the given state.
    #[must_use]
    pub fn capture(state: &SharedState, connected: bool) -> Self {
        let guard = state.read();
        Self {
            session: guard.session.clone(),
            display_statuses: timeline::display_statuses(&guard.steps),
            steps: guard.steps.clone(),
            browser: guard.browser.clone(),
            connected,
            last_event_kind: guard.last_event_kind,
            events_seen: guard.events_seen,
        }
    }
}
