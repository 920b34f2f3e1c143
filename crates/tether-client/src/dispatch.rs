//! Event dispatcher: folds inbound envelopes into the client state.
//!
//! [`apply`] is a pure reducer over `(state, event)`; it assumes nothing
//! about delivery beyond per-connection ordering. Frames that fail to
//! decode are dropped with a debug log and processing continues — a
//! malformed message is never fatal.

use tracing::{debug, warn};

use tether_protocol::{ServerEvent, Session, SessionStatus};

use crate::state::{ClientState, SharedState};
use crate::timeline;

/// Decode one raw text frame and reduce it into the shared state.
pub fn handle_frame(state: &SharedState, text: &str) {
    match serde_json::from_str::<ServerEvent>(text) {
        Ok(event) => {
            debug!(kind = event.kind(), "event received");
            let mut guard = state.write();
            apply(&mut guard, &event);
        }
        Err(err) => {
            debug!(error = %err, "dropping undecodable frame");
        }
    }
}

/// Reduce one event into the state.
pub fn apply(state: &mut ClientState, event: &ServerEvent) {
    state.events_seen += 1;
    state.last_event_kind = Some(event.kind());

    match event {
        ServerEvent::SessionCreated { session_id } => {
            // Always a fresh idle record, whatever the prior status was.
            state.session = Some(Session::idle(session_id.clone()));
        }

        ServerEvent::Screenshot { image, url } => {
            state.browser.screenshot = Some(image.clone());
            if let Some(url) = url {
                state.browser.url = url.clone();
            }
            state.browser.is_loading = false;
        }

        ServerEvent::StepUpdate { step, live_url } => {
            timeline::reconcile(&mut state.steps, step.clone());
            // Some backends attach the live URL redundantly; only touch the
            // slice when it actually changed.
            if let Some(live_url) = live_url {
                if state.browser.live_url.as_deref() != Some(live_url) {
                    state.browser.live_url = Some(live_url.clone());
                }
            }
        }

        ServerEvent::TaskStarted {
            task_name,
            task_summary,
            definition_of_done,
            steps,
        } => {
            if let Some(session) = &mut state.session {
                session.status = SessionStatus::Running;
                session.task_name = task_name.clone();
                session.task_summary = task_summary.clone();
                session.definition_of_done = definition_of_done.clone();
            }
            state.steps = steps.clone();
        }

        ServerEvent::TaskComplete => {
            if let Some(session) = &mut state.session {
                session.status = SessionStatus::Waiting;
            }
        }

        ServerEvent::UrlChanged { url } => {
            state.browser.url = url.clone();
        }

        ServerEvent::Loading { is_loading } => {
            state.browser.is_loading = *is_loading;
        }

        ServerEvent::InterventionStatus { is_user_controlled } => {
            if let Some(session) = &mut state.session {
                session.is_user_controlled = *is_user_controlled;
            }
        }

        ServerEvent::LiveUrl { live_url } => {
            state.browser.live_url = Some(live_url.clone());
        }

        ServerEvent::TaskError { message } => {
            warn!(message = message.as_deref().unwrap_or(""), "agent reported task failure");
            if let Some(session) = &mut state.session {
                session.status = SessionStatus::Error;
            }
        }

        ServerEvent::Unknown => {}
    }
}
