use std::time::Duration;

use thiserror::Error;

/// Failure taxonomy for the relay pipeline.
///
/// Neither the downstream client nor the normalizer recovers locally: every
/// failure propagates unchanged to the retrieval service, which logs context
/// and hands the error to the caller.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Keystore bytes could not be decoded, the password is wrong, the
    /// certificate material is invalid, or the HTTPS client could not be
    /// built. Fatal at startup.
    #[error("TLS configuration rejected: {0}")]
    Configuration(String),

    /// Non-2xx provider response, or a connection-level failure. Status is 0
    /// when the failure happened before any response arrived.
    #[error("downstream request failed with status {status}: {body}")]
    Transport { status: u16, body: String },

    /// The provider call exceeded the configured bound.
    #[error("downstream request timed out after {0:?}")]
    Timeout(Duration),

    /// The provider payload violated the expected schema. `path` names the
    /// first missing or type-mismatched JSON path in dotted form.
    #[error("malformed downstream payload at {path}")]
    MalformedResponse { path: String },

    /// Reserved for a genuine "no data for this location" signal from the
    /// provider. No current dependency produces it; the inbound boundary
    /// keeps the branch as part of its contract.
    #[error("no weather data available for the requested location")]
    NotFound,
}
