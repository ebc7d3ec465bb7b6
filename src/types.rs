//! Common types used throughout es-pagination
//!
//! Shared type aliases and small enums used by more than one module.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Pagination Strategy
// ============================================================================

/// Which cursor implementation walks the result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// `size`/`from` offset paging
    From,
    /// Server-side scroll context
    Scroll,
    /// Sort-key continuation
    #[default]
    SearchAfter,
}

impl Strategy {
    /// Name as used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::From => "from",
            Strategy::Scroll => "scroll",
            Strategy::SearchAfter => "search_after",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Strategy {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "from" | "offset" => Ok(Strategy::From),
            "scroll" => Ok(Strategy::Scroll),
            "search_after" | "search-after" => Ok(Strategy::SearchAfter),
            other => Err(crate::error::Error::invalid_value(
                "strategy",
                format!("unknown strategy '{other}', expected from, scroll or search_after"),
            )),
        }
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_serde() {
        let strategy: Strategy = serde_json::from_str("\"search_after\"").unwrap();
        assert_eq!(strategy, Strategy::SearchAfter);

        let json = serde_json::to_string(&Strategy::Scroll).unwrap();
        assert_eq!(json, "\"scroll\"");
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("from".parse::<Strategy>().unwrap(), Strategy::From);
        assert_eq!("offset".parse::<Strategy>().unwrap(), Strategy::From);
        assert_eq!(
            "search-after".parse::<Strategy>().unwrap(),
            Strategy::SearchAfter
        );
        assert!("pit".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_strategy_display_round_trips() {
        for strategy in [Strategy::From, Strategy::Scroll, Strategy::SearchAfter] {
            assert_eq!(strategy.to_string().parse::<Strategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn test_option_string_none_if_empty() {
        assert_eq!(
            Some("products".to_string()).none_if_empty(),
            Some("products".to_string())
        );
        assert_eq!(Some(String::new()).none_if_empty(), None);
        assert_eq!(None::<String>.none_if_empty(), None);
    }
}
