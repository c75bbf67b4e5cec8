//! Common types used throughout the Airtable client
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type; key order is preserved as received from the API
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// The `fields` mapping of a record: column name to cell value
pub type Fields = JsonObject;

/// Query parameter pairs; repeated keys are allowed (`fields[]`, `records[]`)
pub type QueryPairs = Vec<(String, String)>;

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for transport retries
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
// Cell Format
// ============================================================================

/// Format for cell values in listing responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellFormat {
    /// Raw JSON cell values
    #[default]
    Json,
    /// User-facing string rendering (requires `timeZone` and `userLocale`)
    String,
}

impl CellFormat {
    /// Wire value for the `cellFormat` query parameter
    pub fn as_str(self) -> &'static str {
        match self {
            CellFormat::Json => "json",
            CellFormat::String => "string",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_type_default() {
        assert_eq!(BackoffType::default(), BackoffType::Exponential);
    }

    #[test]
    fn test_backoff_type_serde() {
        let parsed: BackoffType = serde_json::from_str("\"linear\"").unwrap();
        assert_eq!(parsed, BackoffType::Linear);

        let json = serde_json::to_string(&BackoffType::Constant).unwrap();
        assert_eq!(json, "\"constant\"");
    }

    #[test]
    fn test_cell_format_as_str() {
        assert_eq!(CellFormat::Json.as_str(), "json");
        assert_eq!(CellFormat::String.as_str(), "string");
    }
}
