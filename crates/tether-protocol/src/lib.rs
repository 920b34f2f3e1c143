//! # tether-protocol
//!
//! Wire format and domain model for the agent session protocol.
//!
//! - **[`model`]**: `Session`, `Step`, `BrowserState` and their statuses —
//!   the three state slices the client reconciles.
//! - **[`events`]**: inbound [`ServerEvent`] envelopes from the streaming
//!   connection (tagged by a `type` string; unknown tags are preserved as
//!   [`ServerEvent::Unknown`] rather than rejected).
//! - **[`commands`]**: outbound [`ClientCommand`] intents, each tagged with
//!   the current session id.
//!
//! All wire payloads use camelCase field names and snake_case `type` tags.

#![deny(unsafe_code)]

pub mod commands;
pub mod events;
pub mod model;

pub use commands::{BrowserAction, ClientCommand, InterventionAction};
pub use events::ServerEvent;
pub use model::{BrowserState, Session, SessionStatus, Step, StepStatus, StepUpdate};
