//! Batch execution runner.
//!
//! `BatchRunner` is the host-side orchestrator:
//! 1. Resolves the requested node type from its registry.
//! 2. Builds a fresh `ExecutionContext` for the run.
//! 3. Invokes the node once over the full item batch and awaits it.
//! 4. Returns the node's output sequence, or the batch-level failure.
//!
//! The per-item loop (and the continue-on-failure branch point) lives inside
//! the node itself; the runner neither retries nor splits batches.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{error, info, instrument};

use nodes::traits::ExecutionContext;
use nodes::{ExecutableNode, InputItem, OutputItem};

use crate::EngineError;

/// Maps `node_type` strings to boxed `ExecutableNode` implementations.
pub type NodeRegistry = HashMap<String, Arc<dyn ExecutableNode>>;

/// Host-provided execution modes for one run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Capture per-item failures as error outputs instead of aborting.
    pub continue_on_fail: bool,
}

/// The result of running a full batch.
#[derive(Debug)]
pub struct ExecutionResult {
    /// ID minted for this run.
    pub execution_id: uuid::Uuid,
    /// One output item per input item, in input order.
    pub items: Vec<OutputItem>,
}

/// Stateless orchestrator that runs a single batch execution.
pub struct BatchRunner {
    registry: NodeRegistry,
}

impl BatchRunner {
    pub fn new(registry: NodeRegistry) -> Self {
        Self { registry }
    }

    /// Run one batch through the named node and return its output.
    ///
    /// # Errors
    /// Returns `EngineError` when the node type is unregistered or the node
    /// aborts the batch.
    #[instrument(skip(self, items, options), fields(items = items.len()))]
    pub async fn run(
        &self,
        node_type: &str,
        items: &[InputItem],
        options: &RunOptions,
    ) -> Result<ExecutionResult, EngineError> {
        let node = self
            .registry
            .get(node_type)
            .ok_or_else(|| EngineError::UnknownNodeType(node_type.to_string()))?;

        let ctx = ExecutionContext::new(options.continue_on_fail);
        info!(
            execution_id = %ctx.execution_id,
            "executing node '{}' over {} item(s)",
            node_type,
            items.len()
        );

        match node.execute(items, &ctx).await {
            Ok(output) => {
                info!(
                    execution_id = %ctx.execution_id,
                    "node '{}' produced {} output item(s)",
                    node_type,
                    output.len()
                );
                Ok(ExecutionResult {
                    execution_id: ctx.execution_id,
                    items: output,
                })
            }
            Err(err) => {
                error!(execution_id = %ctx.execution_id, "node '{}' failed: {err}", node_type);
                Err(EngineError::NodeFailed {
                    node_type: node_type.to_string(),
                    source: err,
                })
            }
        }
    }
}
