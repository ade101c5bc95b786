//! # mysql-pg-convert
//!
//! Streaming converter from mysqldump output to a PostgreSQL load script.
//!
//! The dump is read once, line by line. Tables, enum types and row data are
//! written as they are encountered; foreign keys, boolean casts, sequences and
//! full-text indexes are collected and written after the data, so the script
//! loads without constraint or ordering problems.
//!
//! - **Type mapping** from MySQL column types to PostgreSQL types
//! - **Enum/set columns** become named enum types
//! - **Zero dates** (`0000-00-00`) replaced by a configurable default
//! - **Skipped lines** reported in the run result
//!
//! ## Example
//!
//! ```rust,no_run
//! use mysql_pg_convert::{ConvertConfig, Converter};
//! use tokio::io::BufReader;
//!
//! #[tokio::main]
//! async fn main() -> mysql_pg_convert::Result<()> {
//!     let config = ConvertConfig::load("config.yaml")?;
//!     let input = BufReader::new(tokio::fs::File::open("dump.sql").await?);
//!     let output = tokio::fs::File::create("dump.pg.sql").await?;
//!     let report = Converter::new(config).run(input, output).await?;
//!     println!("Converted {} tables", report.tables);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod converter;
pub mod core;
pub mod deferred;
pub mod error;
pub mod parser;
pub mod typemap;

// Re-exports for convenient access
pub use config::{ConvertConfig, DateDefault};
pub use converter::{ConversionReport, Converter, ParseContext, ProgressReporter, SkippedLine};
pub use error::{ConvertError, Result};
