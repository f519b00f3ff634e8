//! Node-level error type.

use thiserror::Error;

use trends::TrendsError;

/// Errors raised while executing a node.
///
/// The first four variants are per-item: under continue-on-failure they are
/// captured into an error output item and the batch proceeds. `Fatal` is the
/// batch-level wrapper the node returns when that mode is off; it aborts the
/// whole execution.
#[derive(Debug, Error)]
pub enum NodeError {
    /// A parameter failed to resolve or coerce to its declared type.
    #[error("invalid value for parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    /// The article keys string did not decode to a JSON array.
    #[error("Invalid article keys format. Expected JSON array.")]
    InvalidArticleKeys,

    /// The operation tag is outside the supported set.
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// The collaborator call failed; the upstream message passes through.
    #[error("{0}")]
    Api(#[from] TrendsError),

    /// Batch abort: a per-item failure with continue-on-failure off.
    #[error("Google Trends API error: {0}")]
    Fatal(String),
}
