//! Declarative parameter schema for the Google Trends node.
//!
//! This table is host/UI data, not dispatch logic: a rendering layer shows
//! each field only for the operations listed on it, and the parameter reader
//! resolves unbound values to the defaults declared here. The dispatch core
//! never consults it beyond that.

use serde::{Serialize, Serializer};

use crate::operation::Operation;

/// Declared type of a node parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyKind {
    String,
    Number,
    DateTime,
    Options,
}

/// Default value a property falls back to when the host binds nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Str(&'static str),
    Int(i64),
}

impl DefaultValue {
    pub fn to_value(self) -> serde_json::Value {
        match self {
            DefaultValue::Str(value) => serde_json::Value::String(value.to_string()),
            DefaultValue::Int(value) => serde_json::Value::Number(value.into()),
        }
    }
}

impl Serialize for DefaultValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DefaultValue::Str(value) => serializer.serialize_str(value),
            DefaultValue::Int(value) => serializer.serialize_i64(*value),
        }
    }
}

/// One selectable choice for an `Options` property.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyOption {
    pub name: &'static str,
    pub value: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub description: &'static str,
    /// Action label a host shows in its node picker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<&'static str>,
}

/// One entry in the node's declarative parameter schema.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperty {
    pub display_name: &'static str,
    /// Wire name the host binds values under.
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<&'static [PropertyOption]>,
    pub default: DefaultValue,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
    #[serde(skip_serializing_if = "is_false")]
    pub required: bool,
    /// Operations this field is shown (and read) for; empty means always.
    pub operations: &'static [Operation],
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// Choices for the operation selector.
pub const OPERATION_OPTIONS: &[PropertyOption] = &[
    PropertyOption {
        name: "Daily Trends",
        value: "dailyTrends",
        description: "Get daily trending topics for a specific region",
        action: Some("Get daily trending topics"),
    },
    PropertyOption {
        name: "Real-Time Trends",
        value: "realTimeTrends",
        description: "Get real-time trending topics",
        action: Some("Get real-time trending topics"),
    },
    PropertyOption {
        name: "Trending Articles",
        value: "trendingArticles",
        description: "Get trending articles for specific article keys",
        action: Some("Get trending articles"),
    },
    PropertyOption {
        name: "Interest Over Time",
        value: "interestOverTime",
        description: "Get interest over time data for a keyword",
        action: Some("Get interest over time"),
    },
    PropertyOption {
        name: "Autocomplete",
        value: "autocomplete",
        description: "Get search suggestions for a keyword",
        action: Some("Get autocomplete suggestions"),
    },
    PropertyOption {
        name: "Explore",
        value: "explore",
        description: "Get widget data for a keyword",
        action: Some("Explore trends data"),
    },
    PropertyOption {
        name: "Interest by Region",
        value: "interestByRegion",
        description: "Get interest data by region",
        action: Some("Get interest by region"),
    },
];

/// Choices for the interest-by-region resolution selector.
pub const RESOLUTION_OPTIONS: &[PropertyOption] = &[
    PropertyOption { name: "Country", value: "COUNTRY", description: "", action: None },
    PropertyOption { name: "Region", value: "REGION", description: "", action: None },
    PropertyOption { name: "City", value: "CITY", description: "", action: None },
    PropertyOption { name: "DMA", value: "DMA", description: "", action: None },
];

/// The full parameter schema, one entry per (field, operation set) pair.
pub const PROPERTIES: &[NodeProperty] = &[
    NodeProperty {
        display_name: "Operation",
        name: "operation",
        kind: PropertyKind::Options,
        options: Some(OPERATION_OPTIONS),
        default: DefaultValue::Str("dailyTrends"),
        description: "",
        placeholder: None,
        required: false,
        operations: &[],
    },
    // Daily Trends
    NodeProperty {
        display_name: "Geo Location",
        name: "geo",
        kind: PropertyKind::String,
        options: None,
        default: DefaultValue::Str("US"),
        description: "Geographic location code (e.g., US, GB, DE)",
        placeholder: None,
        required: false,
        operations: &[Operation::DailyTrends],
    },
    NodeProperty {
        display_name: "Language",
        name: "hl",
        kind: PropertyKind::String,
        options: None,
        default: DefaultValue::Str("en"),
        description: "Language code (e.g., en, fr, de)",
        placeholder: None,
        required: false,
        operations: &[Operation::DailyTrends],
    },
    // Real-Time Trends
    NodeProperty {
        display_name: "Geo Location",
        name: "geo",
        kind: PropertyKind::String,
        options: None,
        default: DefaultValue::Str("US"),
        description: "Geographic location code",
        placeholder: None,
        required: false,
        operations: &[Operation::RealTimeTrends],
    },
    NodeProperty {
        display_name: "Trending Hours",
        name: "trendingHours",
        kind: PropertyKind::Number,
        options: None,
        default: DefaultValue::Int(4),
        description: "Number of hours to look back for trending topics",
        placeholder: None,
        required: false,
        operations: &[Operation::RealTimeTrends],
    },
    // Trending Articles
    NodeProperty {
        display_name: "Article Keys",
        name: "articleKeys",
        kind: PropertyKind::String,
        options: None,
        default: DefaultValue::Str(""),
        description: "JSON array of article keys from daily trends",
        placeholder: Some("[[1, \"en\", \"US\"]]"),
        required: false,
        operations: &[Operation::TrendingArticles],
    },
    NodeProperty {
        display_name: "Article Count",
        name: "articleCount",
        kind: PropertyKind::Number,
        options: None,
        default: DefaultValue::Int(5),
        description: "Number of articles to retrieve",
        placeholder: None,
        required: false,
        operations: &[Operation::TrendingArticles],
    },
    // Interest Over Time
    NodeProperty {
        display_name: "Keyword",
        name: "keyword",
        kind: PropertyKind::String,
        options: None,
        default: DefaultValue::Str(""),
        description: "Search keyword",
        placeholder: None,
        required: true,
        operations: &[Operation::InterestOverTime],
    },
    NodeProperty {
        display_name: "Geo Location",
        name: "geo",
        kind: PropertyKind::String,
        options: None,
        default: DefaultValue::Str("US"),
        description: "Geographic location code",
        placeholder: None,
        required: false,
        operations: &[Operation::InterestOverTime],
    },
    // Autocomplete
    NodeProperty {
        display_name: "Keyword",
        name: "keyword",
        kind: PropertyKind::String,
        options: None,
        default: DefaultValue::Str(""),
        description: "Keyword to get suggestions for",
        placeholder: None,
        required: true,
        operations: &[Operation::Autocomplete],
    },
    NodeProperty {
        display_name: "Language",
        name: "language",
        kind: PropertyKind::String,
        options: None,
        default: DefaultValue::Str("en-US"),
        description: "Language code",
        placeholder: None,
        required: false,
        operations: &[Operation::Autocomplete],
    },
    // Explore
    NodeProperty {
        display_name: "Keyword",
        name: "keyword",
        kind: PropertyKind::String,
        options: None,
        default: DefaultValue::Str(""),
        description: "Search keyword",
        placeholder: None,
        required: true,
        operations: &[Operation::Explore],
    },
    NodeProperty {
        display_name: "Geo Location",
        name: "geo",
        kind: PropertyKind::String,
        options: None,
        default: DefaultValue::Str("US"),
        description: "Geographic location code",
        placeholder: None,
        required: false,
        operations: &[Operation::Explore],
    },
    NodeProperty {
        display_name: "Time Range",
        name: "time",
        kind: PropertyKind::String,
        options: None,
        default: DefaultValue::Str("now 1-d"),
        description: "Time range (e.g., \"now 1-d\", \"2025-06-30 2025-07-01\")",
        placeholder: None,
        required: false,
        operations: &[Operation::Explore],
    },
    NodeProperty {
        display_name: "Category",
        name: "category",
        kind: PropertyKind::Number,
        options: None,
        default: DefaultValue::Int(0),
        description: "Category number",
        placeholder: None,
        required: false,
        operations: &[Operation::Explore],
    },
    NodeProperty {
        display_name: "Property",
        name: "property",
        kind: PropertyKind::String,
        options: None,
        default: DefaultValue::Str(""),
        description: "Property filter",
        placeholder: None,
        required: false,
        operations: &[Operation::Explore],
    },
    NodeProperty {
        display_name: "Language",
        name: "hl",
        kind: PropertyKind::String,
        options: None,
        default: DefaultValue::Str("en-US"),
        description: "Language code",
        placeholder: None,
        required: false,
        operations: &[Operation::Explore],
    },
    // Interest by Region
    NodeProperty {
        display_name: "Keywords",
        name: "keywords",
        kind: PropertyKind::String,
        options: None,
        default: DefaultValue::Str(""),
        description: "Comma-separated list of keywords or single keyword",
        placeholder: None,
        required: true,
        operations: &[Operation::InterestByRegion],
    },
    NodeProperty {
        display_name: "Start Date",
        name: "startTime",
        kind: PropertyKind::DateTime,
        options: None,
        default: DefaultValue::Str(""),
        description: "Start date for the analysis",
        placeholder: None,
        required: false,
        operations: &[Operation::InterestByRegion],
    },
    NodeProperty {
        display_name: "End Date",
        name: "endTime",
        kind: PropertyKind::DateTime,
        options: None,
        default: DefaultValue::Str(""),
        description: "End date for the analysis",
        placeholder: None,
        required: false,
        operations: &[Operation::InterestByRegion],
    },
    NodeProperty {
        display_name: "Geo Locations",
        name: "geoRegions",
        kind: PropertyKind::String,
        options: None,
        default: DefaultValue::Str("US"),
        description: "Comma-separated list of geo codes or single geo code",
        placeholder: None,
        required: false,
        operations: &[Operation::InterestByRegion],
    },
    NodeProperty {
        display_name: "Resolution",
        name: "resolution",
        kind: PropertyKind::Options,
        options: Some(RESOLUTION_OPTIONS),
        default: DefaultValue::Str("REGION"),
        description: "Geographic resolution",
        placeholder: None,
        required: false,
        operations: &[Operation::InterestByRegion],
    },
    NodeProperty {
        display_name: "Language",
        name: "hl",
        kind: PropertyKind::String,
        options: None,
        default: DefaultValue::Str("en-US"),
        description: "Language code",
        placeholder: None,
        required: false,
        operations: &[Operation::InterestByRegion],
    },
    NodeProperty {
        display_name: "Timezone",
        name: "timezone",
        kind: PropertyKind::Number,
        options: None,
        default: DefaultValue::Int(-240),
        description: "Timezone offset in minutes",
        placeholder: None,
        required: false,
        operations: &[Operation::InterestByRegion],
    },
    NodeProperty {
        display_name: "Category",
        name: "category",
        kind: PropertyKind::Number,
        options: None,
        default: DefaultValue::Int(0),
        description: "Category number",
        placeholder: None,
        required: false,
        operations: &[Operation::InterestByRegion],
    },
];

/// The property a host would show for `name` under `operation`.
///
/// Fields with an empty operation list (the operation selector itself) match
/// every operation.
pub fn property_for(name: &str, operation: Operation) -> Option<&'static NodeProperty> {
    PROPERTIES.iter().find(|property| {
        property.name == name
            && (property.operations.is_empty() || property.operations.contains(&operation))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_selector_is_the_first_property() {
        let selector = &PROPERTIES[0];
        assert_eq!(selector.name, "operation");
        assert_eq!(selector.kind, PropertyKind::Options);
        assert!(selector.options.is_some());
    }

    #[test]
    fn all_seven_operations_are_listed() {
        let values: Vec<&str> = OPERATION_OPTIONS.iter().map(|o| o.value).collect();
        for operation in Operation::ALL {
            assert!(
                values.contains(&operation.wire_name()),
                "selector is missing {operation}"
            );
        }
        assert_eq!(values.len(), 7);
    }

    #[test]
    fn resolution_offers_exactly_the_four_granularities() {
        let values: Vec<&str> = RESOLUTION_OPTIONS.iter().map(|o| o.value).collect();
        assert_eq!(values, vec!["COUNTRY", "REGION", "CITY", "DMA"]);
    }

    #[test]
    fn every_field_is_visible_for_at_least_one_operation() {
        // The selector has an empty list (always visible); everything else
        // must name its operations explicitly.
        for property in &PROPERTIES[1..] {
            assert!(
                !property.operations.is_empty(),
                "'{}' is shown for no operation",
                property.name
            );
        }
    }

    #[test]
    fn lookup_respects_operation_visibility() {
        let daily_hl = property_for("hl", Operation::DailyTrends).unwrap();
        assert_eq!(daily_hl.default, DefaultValue::Str("en"));

        let explore_hl = property_for("hl", Operation::Explore).unwrap();
        assert_eq!(explore_hl.default, DefaultValue::Str("en-US"));

        assert!(property_for("articleKeys", Operation::Explore).is_none());
        assert!(property_for("operation", Operation::Autocomplete).is_some());
    }
}
