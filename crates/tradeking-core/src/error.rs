//! Error types for the TradeKing client.

use thiserror::Error;

/// Errors surfaced by TradeKing API calls.
///
/// Every error propagates directly to the caller; there is no retry,
/// recovery, or partial result anywhere in the client.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid or missing construction input (credentials, base URL).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request never produced an HTTP status (DNS, TLS, socket).
    #[error("Connection error: {0}")]
    Connection(String),

    /// The API rejected the OAuth signature or token (HTTP 401/403).
    #[error("Authentication failed: HTTP {status}: {body}")]
    Authentication { status: u16, body: String },

    /// Any other non-2xx HTTP status.
    #[error("Request failed: HTTP {status}: {body}")]
    Request { status: u16, body: String },

    /// The response body was not valid JSON, or lacked an expected key.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Caller-supplied arguments violate a documented API precondition.
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for TradeKing operations.
pub type ApiResult<T> = Result<T, ApiError>;
