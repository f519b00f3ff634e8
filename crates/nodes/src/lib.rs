//! `nodes` crate — the `ExecutableNode` trait and the Google Trends node.
//!
//! Every node must implement [`ExecutableNode`]. The engine crate dispatches
//! execution through this trait object; the node itself owns the per-item
//! loop and the continue-on-failure policy.

pub mod error;
pub mod google_trends;
pub mod operation;
pub mod params;
pub mod properties;
pub mod traits;

pub use error::NodeError;
pub use google_trends::GoogleTrendsNode;
pub use operation::Operation;
pub use traits::{ExecutableNode, ExecutionContext, InputItem, NodeDescription, OutputItem};
