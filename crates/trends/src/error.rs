//! Collaborator-level error type.

use thiserror::Error;

/// Errors surfaced by a [`crate::TrendsApi`] implementation.
#[derive(Debug, Error)]
pub enum TrendsError {
    /// The HTTP request itself failed (connect, timeout, body read).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status code.
    #[error("{endpoint} returned status {status}")]
    Status { endpoint: &'static str, status: u16 },

    /// The response body could not be decoded into the expected JSON shape.
    #[error("malformed {endpoint} response: {message}")]
    MalformedResponse {
        endpoint: &'static str,
        message: String,
    },

    /// An explore response did not contain the widget a follow-up call needs.
    #[error("explore returned no {0} widget")]
    MissingWidget(&'static str),

    /// A request URL could not be constructed.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The endpoint refused the call with an error of its own (also raised
    /// by scripted test doubles).
    #[error("{0}")]
    Rejected(String),
}
