//! Configuration validation.

use chrono::{NaiveDate, NaiveDateTime};

use super::{ConvertConfig, DateDefault};
use crate::error::{ConvertError, Result};

/// Validate the configuration.
pub fn validate(config: &ConvertConfig) -> Result<()> {
    if let DateDefault::Value(ref literal) = config.invalid_date_default {
        let parses = NaiveDate::parse_from_str(literal, "%Y-%m-%d").is_ok()
            || NaiveDateTime::parse_from_str(literal, "%Y-%m-%d %H:%M:%S").is_ok();
        if !parses {
            return Err(ConvertError::Config(format!(
                "invalid_date_default must be 'null' or a date (YYYY-MM-DD [HH:MM:SS]), got '{}'",
                literal
            )));
        }
    }

    let name = &config.fulltext_config;
    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(ConvertError::Config(format!(
            "fulltext_config must be a plain identifier, got '{}'",
            name
        )));
    }

    Ok(())
}
