//! Error types for the lead API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because the edit view redirects on it
//! instead of showing a failure notice. The lead API reports its outcome
//! twice, once as the HTTP status and once as the `code` field of the JSON
//! envelope; `HttpError` covers the first, `Rejected` the second.

use thiserror::Error;

use crate::http::TransportError;

/// Errors returned by `LeadClient` and `LeadService`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// HTTP 404, an envelope `code` of 404, or a `get` reply without a lead.
    #[error("lead not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The envelope decoded fine but its `code` is not 200.
    #[error("request rejected with code {code}: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { code: u16, message: Option<String> },

    /// The operation targets an existing lead but no id was given.
    #[error("lead id is required")]
    MissingId,

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The round-trip itself failed; there is no response to interpret.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
