//! Engine-level error types.

use thiserror::Error;

use nodes::NodeError;

/// Errors produced by the batch runner.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No implementation registered for the requested node type.
    #[error("no implementation registered for node_type '{0}'")]
    UnknownNodeType(String),

    /// The node aborted the batch; no output was produced.
    #[error("node '{node_type}' failed: {source}")]
    NodeFailed {
        node_type: String,
        #[source]
        source: NodeError,
    },
}
