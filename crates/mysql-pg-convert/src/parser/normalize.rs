//! Line normalization applied before any structural parsing.
//!
//! mysqldump escapes quotes inside string literals with a backslash (`\'`).
//! PostgreSQL reads the output with `standard_conforming_strings=off`, where
//! backslashes still escape, but a doubled quote is the only form that every
//! later stage of the parser understands. An escaped backslash (`\\`) must stay
//! intact so that `\\'` still ends a literal.

/// Statement prefixes written by mysqldump that have no PostgreSQL counterpart.
const HOUSEKEEPING_PREFIXES: &[&str] = &["LOCK TABLES", "UNLOCK TABLES", "DROP TABLE"];

/// Trim a raw dump line and rewrite `\'` to `''`, leaving `\\` untouched.
pub fn normalize_line(raw: &str) -> String {
    let line = raw.trim();
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push_str("\\\\"),
            Some('\'') => out.push_str("''"),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

/// Whether a normalized line carries nothing to convert: blank lines, SQL and
/// conditional comments, and table locking / dropping statements.
pub fn is_ignorable(line: &str) -> bool {
    line.is_empty()
        || line.starts_with("--")
        || line.starts_with("/*")
        || HOUSEKEEPING_PREFIXES.iter().any(|p| line.starts_with(p))
}
