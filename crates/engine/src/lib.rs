//! `engine` crate — the host-side batch runner.
//!
//! The runner holds a registry of node implementations, hands an ordered
//! item batch to the requested node, and reports the outcome. Items run
//! strictly sequentially inside the node; the runner performs no retries
//! (a single attempt per batch, its outcome taken as final).

pub mod error;
pub mod runner;

pub use error::EngineError;
pub use runner::{BatchRunner, ExecutionResult, NodeRegistry, RunOptions};

#[cfg(test)]
mod runner_tests;
