//! Formula string helpers
//!
//! Small building blocks for the `filterByFormula` parameter. Values are
//! escaped and quoted so that user-supplied text cannot break out of the
//! formula expression.

use crate::types::{Fields, JsonValue};
use chrono::{DateTime, NaiveDate, Utc};

/// Escape single quotes. Already escaped quotes are left alone.
///
/// ```rust
/// use airtable_client::formula::escape_quotes;
///
/// assert_eq!(escape_quotes("Player's Name"), "Player\\'s Name");
/// assert_eq!(escape_quotes("Player\\'s Name"), "Player\\'s Name");
/// ```
pub fn escape_quotes(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    let mut prev_backslash = false;
    for c in value.chars() {
        if c == '\'' && !prev_backslash {
            escaped.push('\\');
        }
        prev_backslash = c == '\\';
        escaped.push(c);
    }
    escaped
}

/// Wrap a string in single quotes, escaping any quotes inside it.
pub fn quoted(value: &str) -> String {
    format!("'{}'", escape_quotes(value))
}

/// Create a reference to a field: `{First Name}`.
pub fn field_name(name: &str) -> String {
    format!("{{{}}}", escape_quotes(name))
}

/// Convert a JSON value into its formula representation.
///
/// Booleans become `TRUE()`/`FALSE()`, null becomes `BLANK()`, numbers pass
/// through, and strings are quoted. Arrays and objects are quoted as their
/// JSON text, which is rarely useful but never breaks the expression.
pub fn to_formula_str(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "BLANK()".to_string(),
        JsonValue::Bool(true) => "TRUE()".to_string(),
        JsonValue::Bool(false) => "FALSE()".to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::String(s) => quoted(s),
        other => quoted(&other.to_string()),
    }
}

/// Produce an equality expression: `{Field}='value'`.
pub fn field_equals(field: &str, value: &JsonValue) -> String {
    format!("{}={}", field_name(field), to_formula_str(value))
}

/// Combine equality expressions for each field/value pair.
///
/// Multiple expressions are grouped with `AND(...)`, or with `OR(...)` when
/// `match_any` is set. Returns `None` for an empty mapping.
pub fn match_fields(fields: &Fields, match_any: bool) -> Option<String> {
    let expressions: Vec<String> = fields
        .iter()
        .map(|(name, value)| field_equals(name, value))
        .collect();

    match expressions.len() {
        0 => None,
        1 => Some(expressions.into_iter().next().unwrap_or_default()),
        _ => {
            let operator = if match_any { "OR" } else { "AND" };
            Some(format!("{}({})", operator, expressions.join(", ")))
        }
    }
}

/// Formula representation of a UTC datetime: `DATETIME_PARSE('...')`.
pub fn datetime_value(value: &DateTime<Utc>) -> String {
    format!(
        "DATETIME_PARSE('{}')",
        value.format("%Y-%m-%dT%H:%M:%S%.3fZ")
    )
}

/// Formula representation of a date: `DATETIME_PARSE('YYYY-MM-DD')`.
pub fn date_value(value: &NaiveDate) -> String {
    format!("DATETIME_PARSE('{}')", value.format("%Y-%m-%d"))
}
