//! Configuration type definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Replacement for MySQL zero dates (`0000-00-00`), which PostgreSQL rejects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "Option<String>", into = "String")]
pub enum DateDefault {
    /// Use NULL; `NOT NULL` columns with a zero default become nullable.
    #[default]
    Null,
    /// Use this date or datetime literal (unquoted, e.g. `1970-01-01`).
    Value(String),
}

impl DateDefault {
    /// Parse a user-supplied value. `null` in any case selects the sentinel.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("null") {
            DateDefault::Null
        } else {
            DateDefault::Value(trimmed.to_string())
        }
    }

    /// SQL text to put in place of a zero date: `NULL` or a quoted literal.
    pub fn sql_literal(&self) -> String {
        match self {
            DateDefault::Null => "NULL".to_string(),
            DateDefault::Value(v) => format!("'{}'", v.replace('\'', "''")),
        }
    }
}

impl From<Option<String>> for DateDefault {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(v) => DateDefault::parse(&v),
            None => DateDefault::Null,
        }
    }
}

impl From<DateDefault> for String {
    fn from(value: DateDefault) -> Self {
        value.to_string()
    }
}

impl fmt::Display for DateDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateDefault::Null => write!(f, "null"),
            DateDefault::Value(v) => write!(f, "{}", v),
        }
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Replacement for zero dates in column defaults and row data (default: null).
    #[serde(default)]
    pub invalid_date_default: DateDefault,

    /// Text search configuration for FULLTEXT indexes (default: "simple").
    #[serde(default = "default_fulltext_config")]
    pub fulltext_config: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            invalid_date_default: DateDefault::default(),
            fulltext_config: default_fulltext_config(),
        }
    }
}

impl ConvertConfig {
    /// Override the zero-date replacement.
    pub fn with_invalid_date_default(mut self, value: DateDefault) -> Self {
        self.invalid_date_default = value;
        self
    }

    /// Override the text search configuration.
    pub fn with_fulltext_config(mut self, name: impl Into<String>) -> Self {
        self.fulltext_config = name.into();
        self
    }
}

fn default_fulltext_config() -> String {
    "simple".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sentinel_any_case() {
        assert_eq!(DateDefault::parse("null"), DateDefault::Null);
        assert_eq!(DateDefault::parse(" NULL "), DateDefault::Null);
        assert_eq!(
            DateDefault::parse("1970-01-01"),
            DateDefault::Value("1970-01-01".to_string())
        );
    }

    #[test]
    fn test_sql_literal() {
        assert_eq!(DateDefault::Null.sql_literal(), "NULL");
        assert_eq!(
            DateDefault::Value("1970-01-01".into()).sql_literal(),
            "'1970-01-01'"
        );
    }
}
