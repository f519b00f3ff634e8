//! The closed set of Google Trends query types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::NodeError;

/// One user-selectable Google Trends operation.
///
/// The set is closed: dispatch matches exhaustively over these variants, and
/// a tag outside the set is rejected before any parameter is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    DailyTrends,
    RealTimeTrends,
    TrendingArticles,
    InterestOverTime,
    Autocomplete,
    Explore,
    InterestByRegion,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::DailyTrends,
        Operation::RealTimeTrends,
        Operation::TrendingArticles,
        Operation::InterestOverTime,
        Operation::Autocomplete,
        Operation::Explore,
        Operation::InterestByRegion,
    ];

    /// Wire spelling: the tag the host binds and output items echo.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Operation::DailyTrends => "dailyTrends",
            Operation::RealTimeTrends => "realTimeTrends",
            Operation::TrendingArticles => "trendingArticles",
            Operation::InterestOverTime => "interestOverTime",
            Operation::Autocomplete => "autocomplete",
            Operation::Explore => "explore",
            Operation::InterestByRegion => "interestByRegion",
        }
    }
}

impl Default for Operation {
    /// The default the operation selector shows.
    fn default() -> Self {
        Operation::DailyTrends
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for Operation {
    type Err = NodeError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .iter()
            .copied()
            .find(|operation| operation.wire_name() == tag)
            .ok_or_else(|| NodeError::UnknownOperation(tag.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for operation in Operation::ALL {
            assert_eq!(operation.wire_name().parse::<Operation>().unwrap(), operation);
        }
    }

    #[test]
    fn unknown_tag_is_rejected_with_the_tag_in_the_message() {
        let err = "weeklyTrends".parse::<Operation>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown operation: weeklyTrends");
    }

    #[test]
    fn serde_spelling_matches_wire_names() {
        for operation in Operation::ALL {
            let value = serde_json::to_value(operation).unwrap();
            assert_eq!(value, serde_json::json!(operation.wire_name()));
        }
    }
}
