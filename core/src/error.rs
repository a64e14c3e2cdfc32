//! Error types for the Bot API client.
//!
//! # Design
//! `Api` gets a dedicated variant carrying the platform's own error envelope,
//! so callers can tell "the platform rejected the request" apart from "the
//! request never made it" (`Transport`, `Cancelled`, `DeadlineExceeded`) and
//! from local construction or decoding failures.

use serde::Deserialize;

/// Extra hints the platform attaches to some error envelopes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResponseParameters {
    /// The group has been migrated to a supergroup with this identifier.
    #[serde(default)]
    pub migrate_to_chat_id: Option<i64>,
    /// Seconds to wait before the request can be repeated (flood control).
    #[serde(default)]
    pub retry_after: Option<i64>,
}

/// The platform's error envelope.
///
/// Every field defaults, so a body that fails to decode still produces a
/// value: callers always receive an `ApiError` for a failed status, even when
/// some of its fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiError {
    pub ok: bool,
    pub error_code: i64,
    pub description: String,
    pub parameters: Option<ResponseParameters>,
    /// HTTP status the envelope arrived with. Not part of the wire body.
    #[serde(skip)]
    pub status: u16,
}

impl ApiError {
    /// Seconds the platform asked us to wait, if this is a flood-control reply.
    pub fn retry_after(&self) -> Option<i64> {
        self.parameters.as_ref().and_then(|p| p.retry_after)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "api error {}: {}", self.error_code, self.description)
    }
}

impl std::error::Error for ApiError {}

/// Errors returned by every `Client` call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The platform answered with a failure status (>= 400) or an `ok: false` envelope.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The request descriptor could not be turned into a valid request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A parameter or body could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The response body could not be decoded into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The HTTP round trip failed before a response was read.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The caller's cancellation token fired before the round trip completed.
    #[error("request cancelled")]
    Cancelled,

    /// The caller's deadline passed before the round trip completed.
    #[error("deadline exceeded")]
    DeadlineExceeded,
}

impl Error {
    pub fn is_api_error(&self) -> bool {
        matches!(self, Error::Api(_))
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Wraps any transport-level failure.
    pub fn transport(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Transport(err.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
