//! Line-level parsing of mysqldump output.
//!
//! Every component here works on a single normalized line and knows nothing
//! about the state of the run; the converter decides which one to call.

pub mod column;
pub mod constraint;
pub mod dates;
pub mod enums;
pub mod insert;
pub mod normalize;
pub mod tokenizer;

pub use column::{translate_column, ColumnDefinition, EnumRequest, TranslatedColumn};
pub use constraint::{foreign_key_statements, fulltext_statement, unique_clause, ConstraintLine};
pub use enums::EnumRegistry;
pub use insert::rewrite_insert;
pub use normalize::{is_ignorable, normalize_line};
