//! Integration tests for the batch runner.
//!
//! These use the real Google Trends node with `MockTrendsApi`, so the whole
//! host boundary (registry lookup, context, output hand-off) is exercised
//! without network access.

use std::sync::Arc;

use serde_json::json;

use nodes::{ExecutableNode, GoogleTrendsNode, InputItem};
use trends::mock::MockTrendsApi;

use crate::{BatchRunner, EngineError, NodeRegistry, RunOptions};

fn registry_with(api: MockTrendsApi) -> NodeRegistry {
    let node = GoogleTrendsNode::new(Arc::new(api));
    let mut registry = NodeRegistry::new();
    registry.insert(
        "googleTrends".to_string(),
        Arc::new(node) as Arc<dyn ExecutableNode>,
    );
    registry
}

fn items(parameter_sets: &[serde_json::Value]) -> Vec<InputItem> {
    parameter_sets
        .iter()
        .map(|params| {
            InputItem::with_parameters(params.as_object().cloned().unwrap_or_default())
        })
        .collect()
}

#[tokio::test]
async fn unregistered_node_type_is_rejected() {
    let runner = BatchRunner::new(NodeRegistry::new());
    let err = runner
        .run("googleTrends", &[], &RunOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::UnknownNodeType(_)));
}

#[tokio::test]
async fn batch_flows_through_registry_and_back() {
    let api = MockTrendsApi::new().succeed_with("dailyTrends", json!({ "trending": [] }));
    let runner = BatchRunner::new(registry_with(api));

    let batch = items(&[json!({ "operation": "dailyTrends" })]);
    let result = runner
        .run("googleTrends", &batch, &RunOptions::default())
        .await
        .unwrap();

    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].json["operation"], "dailyTrends");
    assert_eq!(result.items[0].json["data"], json!({ "trending": [] }));
}

#[tokio::test]
async fn node_abort_surfaces_as_an_engine_error() {
    let api = MockTrendsApi::new().fail_with("autocomplete", "upstream said no");
    let runner = BatchRunner::new(registry_with(api));

    let batch = items(&[json!({ "operation": "autocomplete", "keyword": "rust" })]);
    let err = runner
        .run("googleTrends", &batch, &RunOptions::default())
        .await
        .unwrap_err();

    match err {
        EngineError::NodeFailed { node_type, source } => {
            assert_eq!(node_type, "googleTrends");
            assert_eq!(
                source.to_string(),
                "Google Trends API error: upstream said no"
            );
        }
        other => panic!("expected NodeFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn continue_on_fail_reaches_the_node() {
    let api = MockTrendsApi::new().fail_with("autocomplete", "upstream said no");
    let runner = BatchRunner::new(registry_with(api));

    let batch = items(&[
        json!({ "operation": "autocomplete", "keyword": "rust" }),
        json!({ "operation": "dailyTrends" }),
    ]);
    let result = runner
        .run(
            "googleTrends",
            &batch,
            &RunOptions {
                continue_on_fail: true,
            },
        )
        .await
        .unwrap();

    assert_eq!(result.items.len(), 2);
    assert_eq!(result.items[0].json["error"], "upstream said no");
    assert!(result.items[1].json.get("data").is_some());
}
