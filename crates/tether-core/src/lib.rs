//! # tether-core
//!
//! Foundation types for the Tether client: branded IDs, the error
//! hierarchy, and settings loading.
//!
//! Tether is the client-side synchronization layer that keeps a control
//! surface consistent with a remotely running browser-automation agent.
//! This crate provides the shared vocabulary the other Tether crates
//! depend on:
//!
//! - **Branded IDs**: [`SessionId`] as a newtype for type safety
//! - **Errors**: [`TetherError`] hierarchy via `thiserror`
//! - **Settings**: [`TetherSettings`] with file + env-var loading

#![deny(unsafe_code)]

pub mod errors;
pub mod ids;
pub mod settings;

pub use errors::TetherError;
pub use ids::SessionId;
pub use settings::TetherSettings;
