//! Identifier validation and quoting for generated PostgreSQL statements.
//!
//! Table and column names are read out of the dump and spliced back into new
//! statements (sequences, casts, comments, enum types). Every name goes through
//! [`quote_pg`] so that a name containing a double quote cannot break out of
//! its identifier:
//!
//! 1. Validate the identifier (non-empty, no null bytes)
//! 2. Escape embedded double quotes by doubling them
//! 3. Wrap the result in double quotes
//!
//! Length is not checked. MySQL allows 64 characters (up to 256 bytes) per
//! name and derived names such as `<table>_<column>` are longer still;
//! PostgreSQL truncates long identifiers on its own.

use crate::error::{ConvertError, Result};

/// Validate an identifier taken from the dump.
///
/// Rejects empty names and names containing null bytes with
/// `ConvertError::Identifier`.
pub fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ConvertError::Identifier("identifier cannot be empty".to_string()));
    }

    if name.contains('\0') {
        return Err(ConvertError::Identifier(format!(
            "identifier contains a null byte: {:?}",
            name
        )));
    }

    Ok(())
}

/// Validate and double-quote a PostgreSQL identifier.
///
/// ```
/// use mysql_pg_convert::core::quote_pg;
///
/// assert_eq!(quote_pg("users").unwrap(), "\"users\"");
/// assert_eq!(quote_pg("table\"name").unwrap(), "\"table\"\"name\"");
/// ```
pub fn quote_pg(name: &str) -> Result<String> {
    validate_identifier(name)?;
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}
