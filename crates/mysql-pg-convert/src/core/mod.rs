//! Core data model shared by the parser and the emitter.
//!
//! - [`schema`]: tables and columns as they are assembled from the dump
//! - [`identifier`]: validation and quoting of PostgreSQL identifiers

pub mod identifier;
pub mod schema;

pub use identifier::{quote_pg, validate_identifier};
pub use schema::{Column, Table};
