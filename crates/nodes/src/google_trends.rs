//! The Google Trends integration node.
//!
//! One dispatch per input item: read the operation tag, map the bound
//! parameters onto exactly one collaborator call, and package the result
//! (or the caught error) as an output item. Items run strictly in order;
//! each call completes before the next item starts.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn};

use trends::{
    DailyTrendsOptions, ExploreOptions, InterestByRegionOptions, InterestOverTimeOptions,
    RealTimeTrendsOptions, TrendingArticlesOptions, TrendsApi,
};

use crate::error::NodeError;
use crate::operation::Operation;
use crate::params::{self, ItemParams};
use crate::properties::PROPERTIES;
use crate::traits::{ExecutableNode, ExecutionContext, InputItem, NodeDescription, OutputItem};

/// Node identity, as a hosting platform's rendering layer displays it.
pub static DESCRIPTION: NodeDescription = NodeDescription {
    display_name: "Google Trends",
    name: "googleTrends",
    group: &["transform"],
    version: 1,
    description: "Retrieve Google Trends data",
    inputs: &["main"],
    outputs: &["main"],
    properties: PROPERTIES,
};

/// The node. All data retrieval is delegated to the [`TrendsApi`]
/// collaborator; this type only translates parameters into calls.
pub struct GoogleTrendsNode {
    api: Arc<dyn TrendsApi>,
}

impl GoogleTrendsNode {
    pub fn new(api: Arc<dyn TrendsApi>) -> Self {
        Self { api }
    }

    /// Process one item end to end: parse the tag, read parameters, call out.
    async fn run_item(&self, tag: &str, item: &InputItem) -> Result<Value, NodeError> {
        let operation: Operation = tag.parse()?;
        let params = ItemParams::new(&item.parameters, operation);
        self.dispatch(operation, &params).await
    }

    /// Map one operation's parameters onto exactly one collaborator call.
    async fn dispatch(
        &self,
        operation: Operation,
        params: &ItemParams<'_>,
    ) -> Result<Value, NodeError> {
        match operation {
            Operation::DailyTrends => {
                let options = DailyTrendsOptions {
                    geo: params.string("geo")?,
                    hl: params.string("hl")?,
                };
                Ok(self.api.daily_trends(options).await?)
            }

            Operation::RealTimeTrends => {
                let options = RealTimeTrendsOptions {
                    geo: params.string("geo")?,
                    trending_hours: params.number("trendingHours")?,
                };
                Ok(self.api.real_time_trends(options).await?)
            }

            Operation::TrendingArticles => {
                let options = TrendingArticlesOptions {
                    article_keys: params.article_keys("articleKeys")?,
                    article_count: params.number("articleCount")?,
                };
                Ok(self.api.trending_articles(options).await?)
            }

            Operation::InterestOverTime => {
                let options = InterestOverTimeOptions {
                    keyword: params.string("keyword")?,
                    geo: params.string("geo")?,
                };
                Ok(self.api.interest_over_time(options).await?)
            }

            Operation::Autocomplete => {
                let keyword = params.string("keyword")?;
                let language = params.string("language")?;
                Ok(self.api.autocomplete(&keyword, &language).await?)
            }

            Operation::Explore => {
                let options = ExploreOptions {
                    keyword: params.string("keyword")?,
                    geo: params.string("geo")?,
                    time: params.string("time")?,
                    category: params.number("category")?,
                    property: params.string("property")?,
                    hl: params.string("hl")?,
                };
                Ok(self.api.explore(options).await?)
            }

            Operation::InterestByRegion => {
                let options = InterestByRegionOptions {
                    keyword: params.list_or_scalar("keywords")?,
                    geo: params.list_or_scalar("geoRegions")?,
                    resolution: params.options("resolution")?,
                    hl: params.string("hl")?,
                    timezone: params.number("timezone")?,
                    category: params.number("category")?,
                    start_time: params.date_time("startTime")?,
                    end_time: params.date_time("endTime")?,
                };
                Ok(self.api.interest_by_region(options).await?)
            }
        }
    }
}

#[async_trait]
impl ExecutableNode for GoogleTrendsNode {
    fn description(&self) -> &NodeDescription {
        &DESCRIPTION
    }

    async fn execute(
        &self,
        items: &[InputItem],
        ctx: &ExecutionContext,
    ) -> Result<Vec<OutputItem>, NodeError> {
        let mut return_data = Vec::with_capacity(items.len());

        for item in items {
            let tag = params::operation_tag(&item.parameters);

            match self.run_item(&tag, item).await {
                Ok(data) => {
                    debug!(operation = %tag, "item succeeded");
                    return_data.push(OutputItem {
                        json: json!({ "operation": tag, "data": data }),
                    });
                }
                Err(err) => {
                    if ctx.continue_on_fail {
                        warn!(operation = %tag, "item failed: {err}");
                        return_data.push(OutputItem {
                            json: json!({ "operation": tag, "error": err.to_string() }),
                        });
                        continue;
                    }
                    return Err(NodeError::Fatal(err.to_string()));
                }
            }
        }

        Ok(return_data)
    }
}
