//! `trends-node` CLI entry-point.
//!
//! Available sub-commands:
//! - `describe` — print the node's identity and parameter schema as JSON,
//!   for a host rendering layer.
//! - `run`      — execute a batch of items from a JSON file against the
//!   live Google Trends endpoints.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use engine::{BatchRunner, NodeRegistry, RunOptions};
use nodes::google_trends::DESCRIPTION;
use nodes::{ExecutableNode, GoogleTrendsNode, InputItem};
use trends::TrendsHttpClient;

#[derive(Parser)]
#[command(
    name = "trends-node",
    about = "Google Trends integration node and host harness",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the node's parameter schema as JSON.
    Describe,
    /// Execute a batch of input items read from a JSON file.
    Run {
        /// Path to a JSON array of items, each `{"parameters": {...}}`.
        path: PathBuf,
        /// Capture per-item failures as error outputs instead of aborting.
        #[arg(long)]
        continue_on_fail: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Describe => {
            println!("{}", serde_json::to_string_pretty(&DESCRIPTION)?);
        }
        Command::Run {
            path,
            continue_on_fail,
        } => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("cannot read items file {}", path.display()))?;
            let items: Vec<InputItem> =
                serde_json::from_str(&content).context("items file is not a JSON item array")?;

            let api = TrendsHttpClient::new().context("building the Trends HTTP client")?;
            let node = GoogleTrendsNode::new(Arc::new(api));

            let mut registry = NodeRegistry::new();
            registry.insert(
                DESCRIPTION.name.to_string(),
                Arc::new(node) as Arc<dyn ExecutableNode>,
            );

            let runner = BatchRunner::new(registry);
            let result = runner
                .run(DESCRIPTION.name, &items, &RunOptions { continue_on_fail })
                .await?;

            info!("execution {} finished", result.execution_id);
            let output: Vec<_> = result.items.iter().map(|item| &item.json).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
