//! Table and column records assembled while reading a `CREATE TABLE` block.

use crate::core::quote_pg;
use crate::error::Result;

/// Table metadata.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Table name, as written in the dump (unquoted).
    pub name: String,

    /// Column definitions in declaration order.
    pub columns: Vec<Column>,

    /// Inline constraint clauses (`PRIMARY KEY`, `UNIQUE`, `CHECK`).
    pub constraints: Vec<String>,
}

impl Table {
    /// Create an empty table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Name of the sequence backing the `id` column.
    pub fn id_sequence_name(&self) -> String {
        format!("{}_id_seq", self.name)
    }

    /// `CREATE TABLE` statement with a trailing newline: column declarations
    /// first, then the inline constraints, four-space indented.
    pub fn create_statement(&self) -> Result<String> {
        let mut body = Vec::with_capacity(self.columns.len() + self.constraints.len());
        for column in &self.columns {
            body.push(column.declaration()?);
        }
        body.extend(self.constraints.iter().cloned());

        let mut statement = format!("CREATE TABLE {} (\n", quote_pg(&self.name)?);
        for (idx, line) in body.iter().enumerate() {
            statement.push_str("    ");
            statement.push_str(line);
            if idx + 1 < body.len() {
                statement.push(',');
            }
            statement.push('\n');
        }
        statement.push_str(");\n");
        Ok(statement)
    }
}

/// Column metadata after type translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name (unquoted).
    pub name: String,

    /// PostgreSQL type as written in the column declaration.
    pub data_type: String,

    /// Remaining modifiers (`NOT NULL`, `DEFAULT ...`), possibly empty.
    pub modifiers: String,
}

impl Column {
    /// Declaration line for the `CREATE TABLE` body.
    pub fn declaration(&self) -> Result<String> {
        let name = quote_pg(&self.name)?;
        Ok(if self.modifiers.is_empty() {
            format!("{} {}", name, self.data_type)
        } else {
            format!("{} {} {}", name, self.data_type, self.modifiers)
        })
    }
}
