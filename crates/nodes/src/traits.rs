//! The `ExecutableNode` trait — the contract every node must fulfil.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::properties::NodeProperty;
use crate::NodeError;

/// Shared context passed to every node during execution.
///
/// Defined here (in the nodes crate) so both the engine and individual node
/// implementations can import it without a circular dependency.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// ID of the parent workflow.
    pub workflow_id: uuid::Uuid,
    /// ID of the current execution run.
    pub execution_id: uuid::Uuid,
    /// When set, a per-item failure becomes an error output item and the
    /// batch continues; otherwise it aborts the whole execution.
    pub continue_on_fail: bool,
}

impl ExecutionContext {
    /// Fresh context with newly minted workflow/execution ids.
    pub fn new(continue_on_fail: bool) -> Self {
        Self {
            workflow_id: uuid::Uuid::new_v4(),
            execution_id: uuid::Uuid::new_v4(),
            continue_on_fail,
        }
    }
}

/// One unit of input flowing through a single execution pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputItem {
    /// Parameter values the host bound for this item, keyed by wire name.
    /// Unbound parameters fall back to their schema defaults.
    #[serde(default)]
    pub parameters: Map<String, Value>,
    /// The item's own payload. Integration nodes read bound parameters, not
    /// the payload; it rides along untouched.
    #[serde(default)]
    pub payload: Value,
}

impl InputItem {
    /// Item carrying only bound parameters.
    pub fn with_parameters(parameters: Map<String, Value>) -> Self {
        Self {
            parameters,
            payload: Value::Null,
        }
    }
}

/// One unit of output handed back to the host. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputItem {
    pub json: Value,
}

/// Static identity of a node type, as a hosting platform's rendering layer
/// consumes it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    pub display_name: &'static str,
    /// Registry key for this node type.
    pub name: &'static str,
    pub group: &'static [&'static str],
    pub version: u32,
    pub description: &'static str,
    pub inputs: &'static [&'static str],
    pub outputs: &'static [&'static str],
    /// Declarative parameter schema, including per-operation visibility.
    pub properties: &'static [NodeProperty],
}

/// The core node trait.
///
/// A node receives the host's ordered item batch and returns one output per
/// input (or one error output per failed input, under continue-on-failure).
#[async_trait]
pub trait ExecutableNode: Send + Sync {
    /// Identity and parameter schema, for the host's rendering layer.
    fn description(&self) -> &NodeDescription;

    /// Execute the node over an ordered batch of items.
    async fn execute(
        &self,
        items: &[InputItem],
        ctx: &ExecutionContext,
    ) -> Result<Vec<OutputItem>, NodeError>;
}
