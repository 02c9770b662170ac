//! Error types for FlowMastery operations.
//!
//! Two layers, mirroring the split between the remote gateway transport and
//! the entity services built on top of it:
//!
//! - [`GatewayError`]: the round trip itself failed (transport, codec,
//!   service outage). Produced by [`RecordGateway`](crate::gateway::RecordGateway)
//!   implementations.
//! - [`Error`]: the crate-wide taxonomy surfaced to callers. Input rejected
//!   before any network call is [`Validation`](Error::Validation), a
//!   completed round trip that signaled failure is
//!   [`Operation`](Error::Operation), and a failed round trip is
//!   [`Network`](Error::Network).
//!
//! Every variant renders as a one-line message suitable for a transient
//! user-visible notice; callers are expected to surface and otherwise
//! swallow these, not to branch on them for recovery.

use thiserror::Error;

/// Low-level errors from a [`RecordGateway`](crate::gateway::RecordGateway)
/// implementation.
///
/// These describe a round trip that never completed. Entity services wrap
/// them into [`Error::Network`] before surfacing to callers.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The transport failed (connection refused, reset, DNS, ...).
    #[error("transport error: {message}")]
    Transport {
        /// Human-readable description of the failure.
        message: String,
    },

    /// The gateway response could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The hosted service is unavailable.
    #[error("gateway unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Errors that can occur during FlowMastery operations.
///
/// # Examples
///
/// ```
/// use flowmastery::Error;
///
/// let err = Error::Validation("a task id is required for update".to_string());
/// assert!(err.to_string().contains("task id"));
///
/// let err = Error::Operation {
///     collection: "task2".to_string(),
///     message: "failed to create task".to_string(),
/// };
/// assert!(err.to_string().contains("task2"));
/// ```
#[derive(Debug, Error)]
pub enum Error {
    /// A required input was missing or invalid. Raised before any gateway
    /// round trip; a `Validation` error guarantees nothing was sent.
    #[error("validation error: {0}")]
    Validation(String),

    /// The gateway round trip completed but the per-record result did not
    /// signal success. Carries the gateway's message when one was provided,
    /// else a generic one.
    #[error("operation failed on {collection}: {message}")]
    Operation {
        /// The collection the operation targeted.
        collection: String,
        /// The gateway's failure message, or a generic fallback.
        message: String,
    },

    /// The gateway round trip itself failed.
    #[error("network error: {0}")]
    Network(#[from] GatewayError),

    /// Credentials or other configuration were missing or invalid at
    /// construction time.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The identity widget reported a failure (bootstrap or logout).
    #[error("auth error: {0}")]
    Auth(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = Error::Validation("a task id is required for update".to_string());
        assert_eq!(
            err.to_string(),
            "validation error: a task id is required for update"
        );

        let err = Error::Operation {
            collection: "workflow1".to_string(),
            message: "failed to create workflow".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "operation failed on workflow1: failed to create workflow"
        );

        let err = Error::Network(GatewayError::Unavailable("maintenance".to_string()));
        assert!(err.to_string().contains("maintenance"));
    }

    #[test]
    fn gateway_error_converts_to_network() {
        let gw = GatewayError::Transport {
            message: "connection reset".to_string(),
        };
        let err: Error = gw.into();
        assert!(matches!(err, Error::Network(_)));
    }

    #[test]
    fn serde_error_converts_to_serialization() {
        let bad = serde_json::from_str::<serde_json::Value>("{not json");
        let gw: GatewayError = bad.unwrap_err().into();
        assert!(matches!(gw, GatewayError::Serialization(_)));
    }
}
