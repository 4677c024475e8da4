//! Error types for campaign controller operations.

use thiserror::Error;

/// Primary error type for controller operations.
///
/// Every action boundary (submit, retry, cancel, preview, list) converts
/// its failures into one of these variants; none escape as panics or
/// unhandled transport errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Precondition violated locally; no network call was issued.
    #[error("{message}")]
    Validation {
        /// Human-readable description of the violated precondition.
        message: String,
    },
    /// The request never completed (connection refused, DNS, timeout).
    #[error("cannot connect to the campaign API: {source}")]
    Transport {
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },
    /// The server rejected the credentials with a 401. The session's
    /// unauthorized hook has already fired by the time this surfaces.
    #[error("session expired or credentials rejected")]
    Unauthorized,
    /// The server rejected the request with a structured error body.
    #[error("{message}")]
    Api {
        /// HTTP status code of the rejection.
        status: u16,
        /// Message taken from the response body, or a generic fallback.
        message: String,
    },
    /// The response body did not match the API contract.
    #[error("response did not match the API contract: {source}")]
    Decode {
        /// Underlying deserialization error.
        #[source]
        source: reqwest::Error,
    },
    /// Campaign creation succeeded but the send trigger failed, leaving
    /// the campaign orphaned in `pending`. The client never deletes or
    /// retries the orphan; the operator decides.
    #[error("send trigger failed; campaign {campaign_id} remains pending")]
    SendFailed {
        /// Identifier of the orphaned campaign.
        campaign_id: String,
        /// Error returned by the send trigger.
        #[source]
        source: Box<ClientError>,
    },
}

impl ClientError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Convenience alias for controller results.
pub type Result<T> = std::result::Result<T, ClientError>;
