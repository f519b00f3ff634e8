//! `MockTrendsApi` — a test double for [`TrendsApi`].
//!
//! Records every call it receives (operation tag plus the serialized
//! argument shape, in call order) and answers with scripted results, so
//! dispatcher tests run without network access.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::client::TrendsApi;
use crate::error::TrendsError;
use crate::types::{
    DailyTrendsOptions, ExploreOptions, InterestByRegionOptions, InterestOverTimeOptions,
    RealTimeTrendsOptions, TrendingArticlesOptions,
};

/// Behaviour scripted for one operation.
pub enum MockBehaviour {
    /// Return a specific JSON value.
    ReturnValue(Value),
    /// Reject with the given message.
    Fail(String),
}

/// One recorded invocation.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// Operation tag, in wire spelling (`dailyTrends`, ...).
    pub operation: &'static str,
    /// The call's arguments in their exact wire serialization.
    pub arguments: Value,
}

/// A mock collaborator. Unscripted operations succeed with an empty object.
pub struct MockTrendsApi {
    behaviours: Mutex<HashMap<&'static str, MockBehaviour>>,
    /// All calls seen by this mock (in call order).
    pub calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockTrendsApi {
    pub fn new() -> Self {
        Self {
            behaviours: Mutex::new(HashMap::new()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Script one operation to succeed with the given payload.
    pub fn succeed_with(self, operation: &'static str, value: Value) -> Self {
        self.behaviours
            .lock()
            .unwrap()
            .insert(operation, MockBehaviour::ReturnValue(value));
        self
    }

    /// Script one operation to reject with the given message.
    pub fn fail_with(self, operation: &'static str, message: impl Into<String>) -> Self {
        self.behaviours
            .lock()
            .unwrap()
            .insert(operation, MockBehaviour::Fail(message.into()));
        self
    }

    /// Number of calls this mock has received across all operations.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Recorded calls for one operation, in call order.
    pub fn calls_for(&self, operation: &str) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.operation == operation)
            .cloned()
            .collect()
    }

    fn dispatch(&self, operation: &'static str, arguments: Value) -> Result<Value, TrendsError> {
        self.calls
            .lock()
            .unwrap()
            .push(RecordedCall { operation, arguments });

        match self.behaviours.lock().unwrap().get(operation) {
            Some(MockBehaviour::ReturnValue(value)) => Ok(value.clone()),
            Some(MockBehaviour::Fail(message)) => Err(TrendsError::Rejected(message.clone())),
            None => Ok(json!({})),
        }
    }
}

impl Default for MockTrendsApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TrendsApi for MockTrendsApi {
    async fn daily_trends(&self, options: DailyTrendsOptions) -> Result<Value, TrendsError> {
        let arguments = serde_json::to_value(&options).expect("options serialize");
        self.dispatch("dailyTrends", arguments)
    }

    async fn real_time_trends(
        &self,
        options: RealTimeTrendsOptions,
    ) -> Result<Value, TrendsError> {
        let arguments = serde_json::to_value(&options).expect("options serialize");
        self.dispatch("realTimeTrends", arguments)
    }

    async fn trending_articles(
        &self,
        options: TrendingArticlesOptions,
    ) -> Result<Value, TrendsError> {
        let arguments = serde_json::to_value(&options).expect("options serialize");
        self.dispatch("trendingArticles", arguments)
    }

    async fn interest_over_time(
        &self,
        options: InterestOverTimeOptions,
    ) -> Result<Value, TrendsError> {
        let arguments = serde_json::to_value(&options).expect("options serialize");
        self.dispatch("interestOverTime", arguments)
    }

    async fn autocomplete(&self, keyword: &str, hl: &str) -> Result<Value, TrendsError> {
        self.dispatch("autocomplete", json!({ "keyword": keyword, "hl": hl }))
    }

    async fn explore(&self, options: ExploreOptions) -> Result<Value, TrendsError> {
        let arguments = serde_json::to_value(&options).expect("options serialize");
        self.dispatch("explore", arguments)
    }

    async fn interest_by_region(
        &self,
        options: InterestByRegionOptions,
    ) -> Result<Value, TrendsError> {
        let arguments = serde_json::to_value(&options).expect("options serialize");
        self.dispatch("interestByRegion", arguments)
    }
}
