//! Result of a conversion run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Where a skipped line was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipContext {
    TopLevel,
    InsideTable,
}

/// A line that was not understood and left out of the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLine {
    /// 1-based line number in the input.
    pub line_number: usize,

    /// Normalized line text.
    pub line: String,

    pub context: SkipContext,

    /// Enclosing table, for lines inside a `CREATE TABLE` block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
}

/// Summary of a conversion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    /// When the conversion started.
    pub started_at: DateTime<Utc>,

    /// When the conversion completed.
    pub completed_at: DateTime<Utc>,

    /// Total duration in seconds.
    pub duration_seconds: f64,

    /// Input lines read.
    pub lines_read: usize,

    /// Tables emitted.
    pub tables: usize,

    /// Row insertion statements written.
    pub inserts: usize,

    /// Enum types declared.
    pub enum_types: usize,

    /// Deferred boolean casts.
    pub casts: usize,

    /// Deferred foreign key constraints.
    pub foreign_keys: usize,

    /// Sequences created for `id` columns.
    pub sequences: usize,

    /// Deferred full-text indexes.
    pub fulltext_indexes: usize,

    /// Lines that were not recognized.
    pub skipped_lines: Vec<SkippedLine>,
}

impl ConversionReport {
    /// Convert to JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
