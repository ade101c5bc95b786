//! Registry of enum types synthesized for MySQL `enum(...)` / `set(...)` columns.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::core::quote_pg;
use crate::error::Result;

/// One enum type per table + column, declared at most once per run.
#[derive(Debug, Default)]
pub struct EnumRegistry {
    types: HashMap<(String, String), Vec<String>>,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the enum type for a column: `<table>_<column>`.
    pub fn type_name(table: &str, column: &str) -> String {
        format!("{}_{}", table, column)
    }

    /// Register the enum type for `table.column`.
    ///
    /// Returns the quoted type name and, the first time the key is seen, the
    /// `DROP TYPE` / `CREATE TYPE` statements (without terminators) that have
    /// to be written before the table that uses it. A later registration with
    /// a different member list keeps the first declaration and logs a warning.
    pub fn register(
        &mut self,
        table: &str,
        column: &str,
        members: &[String],
    ) -> Result<(String, Option<[String; 2]>)> {
        let quoted = quote_pg(&Self::type_name(table, column))?;
        let key = (table.to_string(), column.to_string());

        if let Some(declared) = self.types.get(&key) {
            if declared.as_slice() != members {
                warn!(
                    "Enum type {} already declared with ({}), ignoring ({})",
                    quoted,
                    declared.join(","),
                    members.join(",")
                );
            }
            return Ok((quoted, None));
        }

        debug!("Declaring enum type {} with {} members", quoted, members.len());
        let statements = [
            format!("DROP TYPE IF EXISTS {}", quoted),
            format!("CREATE TYPE {} AS ENUM ({})", quoted, members.join(",")),
        ];
        self.types.insert(key, members.to_vec());
        Ok((quoted, Some(statements)))
    }

    /// Number of distinct enum types declared.
    pub fn declared_count(&self) -> usize {
        self.types.len()
    }
}
