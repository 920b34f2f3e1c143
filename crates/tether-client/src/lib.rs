//! # tether-client
//!
//! Client-side synchronization layer for a remotely running
//! browser-automation agent.
//!
//! The [`AgentSession`] facade composes the pieces:
//!
//! - [`connection`]: one duplex WebSocket with automatic fixed-delay
//!   reconnect and a connectivity flag
//! - [`dispatch`]: pure reducers that fold inbound events into the three
//!   state slices (session, step timeline, browser state)
//! - [`timeline`]: step reconciliation (merge-by-id, append-unknown) and
//!   derived display statuses
//! - [`viewport`]: contain-scaling pointer mapping from a letterboxed
//!   display rectangle to native browser coordinates
//! - [`commands`]: outbound intents, tagged with the current session id
//! - [`api`]: the two synchronous request/response calls (chat, confirm)
//!
//! State flows one way: the connection feeds the dispatcher, the dispatcher
//! writes the shared state, and [`AgentSession::snapshot`] exposes a
//! consistent view. User intents flow the opposite way through the command
//! sender, never gated on locally cached authority flags.

#![deny(unsafe_code)]

pub mod api;
pub mod commands;
pub mod connection;
pub mod dispatch;
pub mod session;
pub mod state;
pub mod timeline;
pub mod viewport;

pub use api::{ApiClient, ChatReply};
pub use commands::CommandSender;
pub use connection::ConnectionManager;
pub use session::AgentSession;
pub use state::{ClientState, SharedState, Snapshot};
pub use viewport::{ContainTransform, NativePoint, NativeSize};
