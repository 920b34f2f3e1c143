//! Error hierarchy for the Tether client.
//!
//! Transport failures are deliberately *not* part of this hierarchy: the
//! connection layer recovers from them with its reconnect loop and never
//! surfaces them to callers (see the connection manager in `tether-client`).
//! What remains are the failures a caller can actually observe: settings
//! loading, the two synchronous HTTP calls, and sending without a session.

use thiserror::Error;

use crate::settings::SettingsError;

/// Top-level error type for the Tether client.
#[derive(Debug, Error)]
pub enum TetherError {
    /// Settings could not be loaded or parsed.
    #[error("{0}")]
    Settings(#[from] SettingsError),

    /// A synchronous HTTP request failed (network or non-2xx).
    #[error("{0}")]
    Api(#[from] ApiError),

    /// An operation required a session id before the server assigned one.
    #[error("no session established yet")]
    NoSession,
}

/// Errors from the two request/response endpoints (`/api/chat`,
/// `/api/confirm`). These propagate to the caller; the client performs no
/// automatic retry for them.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the response body not read.
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        /// Endpoint path that failed.
        endpoint: String,
        /// Underlying HTTP client error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The server answered with a non-success status.
    #[error("{endpoint} returned status {status}")]
    Status {
        /// Endpoint path that failed.
        endpoint: String,
        /// HTTP status code.
        status: u16,
    },

    /// The response body could not be decoded.
    #[error("invalid response from {endpoint}: {source}")]
    Decode {
        /// Endpoint path that failed.
        endpoint: String,
        /// Underlying decode error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApiError {
    /// Wrap a transport-level failure for an endpoint.
    #[must_use]
    pub fn transport(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }

    /// Wrap a decode failure for an endpoint.
    #[must_use]
    pub fn decode(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }

    /// Build a status error for an endpoint.
    #[must_use]
    pub fn status(endpoint: impl Into<String>, status: u16) -> Self {
        Self::Status {
            endpoint: endpoint.into(),
            status,
        }
    }
}
