//! Error types for the `marketlink-rs` crate.
//!
//! All fallible operations in this crate return [`Result<T>`], which is an
//! alias for `std::result::Result<T, BrokerError>`.
//!
//! [`BrokerError`] covers both the REST client (API errors, HTTP status and
//! transport errors, JSON, URL) and the feed client (bad credentials, limit
//! and liveness faults, malformed wire data). See [`crate::feed`] for how the
//! feed-specific variants are raised and handled.

use std::fmt;

/// Error response returned by the broker API.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    /// Category of the error (e.g. "Invalid Authentication").
    #[serde(default)]
    pub error_type: Option<String>,
    /// Broker error code (e.g. "DH-901").
    #[serde(default)]
    pub error_code: Option<String>,
    /// Human-readable description of the error.
    #[serde(default)]
    pub error_message: Option<String>,
}

impl fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.error_code.as_deref().unwrap_or("UNKNOWN"),
            self.error_type.as_deref().unwrap_or("Unknown Error"),
            self.error_message.as_deref().unwrap_or("No message"),
        )
    }
}

/// All possible errors produced by the `marketlink-rs` client.
#[derive(Debug, thiserror::Error)]
pub enum BrokerError {
    /// An error response returned by the broker REST API.
    #[error("API error: {0}")]
    Api(ApiErrorBody),

    /// The server returned an unexpected HTTP status code.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code.
        status: reqwest::StatusCode,
        /// The response body text.
        body: String,
    },

    /// A network or transport-level error from `reqwest`.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to deserialize a JSON response body.
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A WebSocket-level error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// An error building or parsing a URL.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The caller provided an invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The supplied credential (client ID or access token) was missing or empty.
    ///
    /// Fatal at construction — the caller must supply a valid credential
    /// before retrying.
    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    /// The WebSocket handshake to an upstream feed endpoint failed.
    ///
    /// Surfaced synchronously from the first `connect()` call; subsequent
    /// reconnect attempts retry internally and do not surface this variant.
    #[error("connect failed: {0}")]
    ConnectFailed(String),

    /// The post-open authorization frame was rejected by the upstream.
    ///
    /// Not retried — a rejected auth frame almost always means the
    /// credential itself is invalid or expired.
    #[error("authorization rejected: {0}")]
    AuthRejected(String),

    /// A connection, per-connection instrument, or per-batch cap was hit.
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// The operation requires an open connection but none is available.
    #[error("not connected")]
    NotConnected,

    /// A binary market-data frame failed bounds or shape validation.
    ///
    /// Logged and the frame is skipped; the owning connection is
    /// unaffected.
    #[error("malformed packet: {0}")]
    MalformedPacket(String),

    /// A text order-update frame did not match the expected envelope shape.
    #[error("invalid envelope: {0}")]
    InvalidEnvelope(String),

    /// No pong was observed within the configured `PongWait` window.
    ///
    /// Raised by the health monitor; the connection transitions to
    /// `Reconnecting` in response and this variant never reaches the public
    /// API synchronously.
    #[error("liveness lost: no pong within {0:?}")]
    LivenessLost(std::time::Duration),

    /// A user-supplied callback panicked or returned an error.
    ///
    /// Caught by the recovery middleware, reported via the registered
    /// error callback, and the read loop continues.
    #[error("handler fault: {0}")]
    HandlerFault(String),

    /// A socket read or write failed.
    ///
    /// Retriable failures trigger reconnect internally; only a fatal
    /// failure during the very first connect surfaces this variant.
    #[error("socket I/O error: {0}")]
    SocketIO(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BrokerError>;
