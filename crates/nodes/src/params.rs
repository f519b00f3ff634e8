//! Schema-aware per-item parameter resolution.
//!
//! Each item gets a fresh [`ItemParams`] view over its bound values: lookups
//! resolve against the property schema for the selected operation, fall back
//! to declared defaults, and coerce to the declared type. Nothing is shared
//! across items.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use trends::ListOrScalar;

use crate::error::NodeError;
use crate::operation::Operation;
use crate::properties;

/// Read the raw operation tag bound for an item.
///
/// An unbound tag falls back to the selector's default; a non-string value
/// is passed through verbatim so dispatch can report it as unknown.
pub fn operation_tag(bound: &Map<String, Value>) -> String {
    match bound.get("operation") {
        Some(Value::String(tag)) => tag.clone(),
        Some(other) => other.to_string(),
        None => Operation::default().wire_name().to_string(),
    }
}

/// Read-only view over one item's bound parameters.
pub struct ItemParams<'a> {
    bound: &'a Map<String, Value>,
    operation: Operation,
}

impl<'a> ItemParams<'a> {
    pub fn new(bound: &'a Map<String, Value>, operation: Operation) -> Self {
        Self { bound, operation }
    }

    /// Raw resolution: the host-bound value if present, else the schema
    /// default for this (name, operation) pair.
    fn resolve(&self, name: &str) -> Result<Value, NodeError> {
        if let Some(value) = self.bound.get(name) {
            if !value.is_null() {
                return Ok(value.clone());
            }
        }
        let property = properties::property_for(name, self.operation).ok_or_else(|| {
            NodeError::InvalidParameter {
                name: name.to_string(),
                message: format!("not a parameter of operation '{}'", self.operation),
            }
        })?;
        Ok(property.default.to_value())
    }

    pub fn string(&self, name: &str) -> Result<String, NodeError> {
        match self.resolve(name)? {
            Value::String(value) => Ok(value),
            other => Err(type_mismatch(name, "string", &other)),
        }
    }

    pub fn number(&self, name: &str) -> Result<i64, NodeError> {
        match self.resolve(name)? {
            Value::Number(value) => value.as_i64().ok_or_else(|| NodeError::InvalidParameter {
                name: name.to_string(),
                message: format!("expected an integer, got {value}"),
            }),
            other => Err(type_mismatch(name, "number", &other)),
        }
    }

    /// Comma-bearing strings split into trimmed lists; plain strings stay
    /// scalar. The collaborator depends on this dual shape.
    pub fn list_or_scalar(&self, name: &str) -> Result<ListOrScalar, NodeError> {
        Ok(ListOrScalar::from_delimited(&self.string(name)?))
    }

    /// Date-times are optional: an unbound or empty value resolves to `None`
    /// so the collaborator call carries no such field at all.
    pub fn date_time(&self, name: &str) -> Result<Option<DateTime<Utc>>, NodeError> {
        let raw = self.string(name)?;
        if raw.is_empty() {
            return Ok(None);
        }
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| Some(parsed.with_timezone(&Utc)))
            .map_err(|e| NodeError::InvalidParameter {
                name: name.to_string(),
                message: format!("'{raw}' is not an RFC 3339 date-time: {e}"),
            })
    }

    /// Article keys arrive as a JSON-encoded array; anything else is a
    /// handled per-item error, raised before any collaborator call.
    pub fn article_keys(&self, name: &str) -> Result<Vec<Value>, NodeError> {
        let raw = self.string(name)?;
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(keys)) => Ok(keys),
            _ => Err(NodeError::InvalidArticleKeys),
        }
    }

    /// Options-typed parameters deserialize into their closed enum.
    pub fn options<T: DeserializeOwned>(&self, name: &str) -> Result<T, NodeError> {
        let value = self.resolve(name)?;
        serde_json::from_value(value.clone()).map_err(|_| NodeError::InvalidParameter {
            name: name.to_string(),
            message: format!("unsupported value {value}"),
        })
    }
}

fn type_mismatch(name: &str, expected: &str, got: &Value) -> NodeError {
    NodeError::InvalidParameter {
        name: name.to_string(),
        message: format!("expected a {expected}, got {got}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use trends::Resolution;

    fn bound(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn bound_values_win_over_defaults() {
        let map = bound(json!({ "geo": "DE" }));
        let params = ItemParams::new(&map, Operation::DailyTrends);
        assert_eq!(params.string("geo").unwrap(), "DE");
        // 'hl' is unbound, so the dailyTrends default applies.
        assert_eq!(params.string("hl").unwrap(), "en");
    }

    #[test]
    fn defaults_depend_on_the_selected_operation() {
        let map = bound(json!({}));
        assert_eq!(
            ItemParams::new(&map, Operation::DailyTrends).string("hl").unwrap(),
            "en"
        );
        assert_eq!(
            ItemParams::new(&map, Operation::Explore).string("hl").unwrap(),
            "en-US"
        );
    }

    #[test]
    fn numbers_must_be_integers() {
        let map = bound(json!({ "trendingHours": 4.5 }));
        let params = ItemParams::new(&map, Operation::RealTimeTrends);
        let err = params.number("trendingHours").unwrap_err();
        assert!(matches!(err, NodeError::InvalidParameter { .. }));

        let map = bound(json!({}));
        let params = ItemParams::new(&map, Operation::RealTimeTrends);
        assert_eq!(params.number("trendingHours").unwrap(), 4);
    }

    #[test]
    fn fields_of_other_operations_do_not_resolve() {
        let map = bound(json!({}));
        let params = ItemParams::new(&map, Operation::Autocomplete);
        assert!(params.string("articleKeys").is_err());
    }

    #[test]
    fn empty_date_time_resolves_to_none() {
        let map = bound(json!({ "startTime": "" }));
        let params = ItemParams::new(&map, Operation::InterestByRegion);
        assert_eq!(params.date_time("startTime").unwrap(), None);

        // Unbound behaves the same: the schema default is the empty string.
        let map = bound(json!({}));
        let params = ItemParams::new(&map, Operation::InterestByRegion);
        assert_eq!(params.date_time("endTime").unwrap(), None);
    }

    #[test]
    fn textual_date_times_parse_to_utc() {
        let map = bound(json!({ "startTime": "2025-06-30T12:00:00-04:00" }));
        let params = ItemParams::new(&map, Operation::InterestByRegion);
        let parsed = params.date_time("startTime").unwrap().unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-06-30T16:00:00+00:00");
    }

    #[test]
    fn malformed_date_time_is_a_parameter_error() {
        let map = bound(json!({ "startTime": "next tuesday" }));
        let params = ItemParams::new(&map, Operation::InterestByRegion);
        assert!(matches!(
            params.date_time("startTime"),
            Err(NodeError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn article_keys_must_be_a_json_array() {
        let map = bound(json!({ "articleKeys": "[[1, \"en\", \"US\"]]" }));
        let params = ItemParams::new(&map, Operation::TrendingArticles);
        assert_eq!(
            params.article_keys("articleKeys").unwrap(),
            vec![json!([1, "en", "US"])]
        );

        for raw in ["not json", "{\"a\": 1}", "42"] {
            let map = bound(json!({ "articleKeys": raw }));
            let params = ItemParams::new(&map, Operation::TrendingArticles);
            assert!(matches!(
                params.article_keys("articleKeys"),
                Err(NodeError::InvalidArticleKeys)
            ));
        }
    }

    #[test]
    fn options_parameters_deserialize_into_their_enum() {
        let map = bound(json!({ "resolution": "CITY" }));
        let params = ItemParams::new(&map, Operation::InterestByRegion);
        assert_eq!(params.options::<Resolution>("resolution").unwrap(), Resolution::City);

        // Unbound falls back to the schema default.
        let map = bound(json!({}));
        let params = ItemParams::new(&map, Operation::InterestByRegion);
        assert_eq!(
            params.options::<Resolution>("resolution").unwrap(),
            Resolution::Region
        );

        let map = bound(json!({ "resolution": "PLANET" }));
        let params = ItemParams::new(&map, Operation::InterestByRegion);
        assert!(params.options::<Resolution>("resolution").is_err());
    }

    #[test]
    fn operation_tag_falls_back_to_the_selector_default() {
        assert_eq!(operation_tag(&bound(json!({}))), "dailyTrends");
        assert_eq!(
            operation_tag(&bound(json!({ "operation": "explore" }))),
            "explore"
        );
        // Non-string tags pass through for dispatch to reject.
        assert_eq!(operation_tag(&bound(json!({ "operation": 7 }))), "7");
    }
}
