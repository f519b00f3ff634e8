//! The `TrendsApi` trait — the contract every collaborator implementation
//! must fulfil.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TrendsError;
use crate::types::{
    DailyTrendsOptions, ExploreOptions, InterestByRegionOptions, InterestOverTimeOptions,
    RealTimeTrendsOptions, TrendingArticlesOptions,
};

/// One async function per Trends operation.
///
/// Every method returns the upstream payload as opaque JSON; no data
/// modeling happens at this boundary. `autocomplete` takes positional
/// arguments rather than an options struct, matching the upstream calling
/// convention.
#[async_trait]
pub trait TrendsApi: Send + Sync {
    /// Daily trending topics for a region.
    async fn daily_trends(&self, options: DailyTrendsOptions) -> Result<Value, TrendsError>;

    /// Real-time trending topics over a look-back window.
    async fn real_time_trends(
        &self,
        options: RealTimeTrendsOptions,
    ) -> Result<Value, TrendsError>;

    /// Articles behind a set of trending-topic keys.
    async fn trending_articles(
        &self,
        options: TrendingArticlesOptions,
    ) -> Result<Value, TrendsError>;

    /// Interest-over-time series for a keyword.
    async fn interest_over_time(
        &self,
        options: InterestOverTimeOptions,
    ) -> Result<Value, TrendsError>;

    /// Search suggestions for a keyword.
    async fn autocomplete(&self, keyword: &str, hl: &str) -> Result<Value, TrendsError>;

    /// The widget set the Trends UI would render for a query.
    async fn explore(&self, options: ExploreOptions) -> Result<Value, TrendsError>;

    /// Interest broken down by geographic region.
    async fn interest_by_region(
        &self,
        options: InterestByRegionOptions,
    ) -> Result<Value, TrendsError>;
}
