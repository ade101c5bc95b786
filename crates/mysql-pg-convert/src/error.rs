//! Error types for the conversion library.

use thiserror::Error;

/// Exit code for configuration errors (bad YAML, invalid option values).
pub const EXIT_CONFIG_ERROR: u8 = 1;

/// Exit code for a dump that ends inside a `CREATE TABLE` block.
pub const EXIT_PARSE_ERROR: u8 = 3;

/// Exit code for identifiers that cannot be quoted safely.
pub const EXIT_IDENTIFIER_ERROR: u8 = 4;

/// Exit code for I/O failures (missing input, unwritable output).
pub const EXIT_IO_ERROR: u8 = 7;

/// Main error type for conversion operations.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Configuration error (invalid YAML, bad option values, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Identifier rejected by validation (empty, null byte)
    #[error("Invalid identifier: {0}")]
    Identifier(String),

    /// Input ended while a table definition was still open
    #[error("Input ended inside the definition of table \"{table}\" (opened at line {line})")]
    UnterminatedTable { table: String, line: usize },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConvertError {
    /// Create an UnterminatedTable error
    pub fn unterminated(table: impl Into<String>, line: usize) -> Self {
        ConvertError::UnterminatedTable {
            table: table.into(),
            line,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            ConvertError::Config(_) | ConvertError::Yaml(_) | ConvertError::Json(_) => {
                EXIT_CONFIG_ERROR
            }
            ConvertError::UnterminatedTable { .. } => EXIT_PARSE_ERROR,
            ConvertError::Identifier(_) => EXIT_IDENTIFIER_ERROR,
            ConvertError::Io(_) => EXIT_IO_ERROR,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
