//! `trends` crate — the Google Trends collaborator boundary.
//!
//! [`TrendsApi`] is the seam the node dispatches through: seven async
//! operations, each taking the argument shape the upstream endpoints expect
//! and returning the payload as opaque JSON. [`TrendsHttpClient`] talks to
//! the live endpoints; [`mock::MockTrendsApi`] records calls for tests.

pub mod client;
pub mod error;
pub mod http;
pub mod mock;
pub mod types;

pub use client::TrendsApi;
pub use error::TrendsError;
pub use http::TrendsHttpClient;
pub use types::{
    DailyTrendsOptions, ExploreOptions, InterestByRegionOptions, InterestOverTimeOptions,
    ListOrScalar, RealTimeTrendsOptions, Resolution, TrendingArticlesOptions,
};
