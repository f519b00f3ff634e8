//! Argument shapes for the seven Trends operations.
//!
//! Field names and the scalar-vs-list duality are contractual: they mirror
//! what the upstream endpoints accept, so callers can serialize any options
//! struct and get the exact wire configuration of the call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// ListOrScalar
// ---------------------------------------------------------------------------

/// A value the Trends wire format accepts either as a bare string or as an
/// ordered list of strings.
///
/// `interestByRegion` compares one keyword against one geo, or N keywords
/// against N geos; the upstream convention is a scalar for the former and an
/// array for the latter, never a one-element array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListOrScalar {
    Scalar(String),
    List(Vec<String>),
}

impl ListOrScalar {
    /// Normalize a comma-bearing string into a trimmed list; a string
    /// without commas stays scalar. This is the only place the dual shape
    /// is produced.
    pub fn from_delimited(raw: &str) -> Self {
        if raw.contains(',') {
            ListOrScalar::List(raw.split(',').map(|part| part.trim().to_string()).collect())
        } else {
            ListOrScalar::Scalar(raw.to_string())
        }
    }

    /// View the value as an ordered sequence regardless of shape.
    pub fn values(&self) -> Vec<&str> {
        match self {
            ListOrScalar::Scalar(value) => vec![value.as_str()],
            ListOrScalar::List(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Geographic granularity for `interestByRegion`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Resolution {
    Country,
    Region,
    City,
    Dma,
}

// ---------------------------------------------------------------------------
// Per-operation option structs
// ---------------------------------------------------------------------------

/// Arguments for the daily trending topics feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTrendsOptions {
    /// Geographic location code (e.g. `US`, `GB`, `DE`).
    pub geo: String,
    /// Language code (e.g. `en`, `fr`).
    pub hl: String,
}

/// Arguments for the real-time trending topics feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealTimeTrendsOptions {
    pub geo: String,
    /// Look-back window in hours.
    pub trending_hours: i64,
}

/// Arguments for fetching the articles behind a set of trending topics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingArticlesOptions {
    /// Article key tuples as returned inside a daily trends payload. Kept
    /// opaque; the endpoint echoes whatever shape daily trends produced.
    pub article_keys: Vec<Value>,
    pub article_count: i64,
}

/// Arguments for the interest-over-time series of a single keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestOverTimeOptions {
    pub keyword: String,
    pub geo: String,
}

/// Arguments for the explore call, which returns the widget set the Trends
/// UI would render for a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExploreOptions {
    pub keyword: String,
    pub geo: String,
    /// Time range expression (e.g. `now 1-d`, `2025-06-30 2025-07-01`).
    pub time: String,
    pub category: i64,
    /// Property filter (`images`, `news`, `youtube`, or empty for web).
    pub property: String,
    pub hl: String,
}

/// Arguments for interest-by-region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestByRegionOptions {
    /// One keyword, or several to compare.
    pub keyword: ListOrScalar,
    /// One geo, or one per keyword.
    pub geo: ListOrScalar,
    pub resolution: Resolution,
    pub hl: String,
    /// Timezone offset in minutes.
    pub timezone: i64,
    pub category: i64,
    /// Omitted entirely when absent; the endpoint applies its own window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn comma_bearing_string_becomes_trimmed_list() {
        let value = ListOrScalar::from_delimited("rust, go , zig");
        assert_eq!(
            value,
            ListOrScalar::List(vec!["rust".into(), "go".into(), "zig".into()])
        );
        assert_eq!(value.values(), vec!["rust", "go", "zig"]);
    }

    #[test]
    fn plain_string_stays_scalar() {
        let value = ListOrScalar::from_delimited("rust");
        assert_eq!(value, ListOrScalar::Scalar("rust".into()));
        assert_eq!(value.values(), vec!["rust"]);
    }

    #[test]
    fn list_or_scalar_serializes_as_bare_string_or_array() {
        assert_eq!(
            serde_json::to_value(ListOrScalar::Scalar("US".into())).unwrap(),
            json!("US")
        );
        assert_eq!(
            serde_json::to_value(ListOrScalar::List(vec!["a".into(), "b".into()])).unwrap(),
            json!(["a", "b"])
        );
    }

    #[test]
    fn resolution_uses_upstream_spelling() {
        assert_eq!(serde_json::to_value(Resolution::Dma).unwrap(), json!("DMA"));
        assert_eq!(
            serde_json::to_value(Resolution::Country).unwrap(),
            json!("COUNTRY")
        );
        let parsed: Resolution = serde_json::from_value(json!("CITY")).unwrap();
        assert_eq!(parsed, Resolution::City);
    }

    #[test]
    fn absent_dates_leave_no_trace_in_the_wire_form() {
        let options = InterestByRegionOptions {
            keyword: ListOrScalar::Scalar("rust".into()),
            geo: ListOrScalar::Scalar("US".into()),
            resolution: Resolution::Region,
            hl: "en-US".into(),
            timezone: -240,
            category: 0,
            start_time: None,
            end_time: None,
        };
        let wire = serde_json::to_value(&options).unwrap();
        assert!(wire.get("startTime").is_none());
        assert!(wire.get("endTime").is_none());
        assert_eq!(wire["timezone"], json!(-240));
    }
}
