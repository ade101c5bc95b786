//! Key and constraint lines inside a `CREATE TABLE` block.
//!
//! mysqldump writes every index of a table inline. PostgreSQL wants some of
//! them inline (primary key, unique, check), and the rest as separate
//! statements that are only run after the data has been loaded.

use super::tokenizer::{first_group, read_quoted_identifier, split_top_level};

/// A recognized key/constraint line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintLine {
    /// `PRIMARY KEY (...)`, kept verbatim.
    PrimaryKey(String),
    /// `CONSTRAINT <name> FOREIGN KEY (<columns>) REFERENCES ...`.
    ForeignKey {
        /// Everything after `CONSTRAINT`.
        definition: String,
        /// Parenthesized referencing column list, e.g. `("a_id")`.
        columns: String,
    },
    /// `CONSTRAINT <name> CHECK (...)`, kept verbatim.
    Check(String),
    /// `UNIQUE KEY <name> (<columns>)`.
    Unique { columns: Vec<String> },
    /// `FULLTEXT KEY <name> (<columns>)`.
    Fulltext { columns: Vec<String> },
    /// `KEY` / `INDEX` / `SPATIAL KEY`; dropped.
    PlainIndex,
}

impl ConstraintLine {
    /// Recognize a normalized line. Returns `None` for anything that is not
    /// a key or constraint, and for key lines whose column list is unreadable.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(',').trim_end();

        if line.starts_with("PRIMARY KEY") {
            return Some(ConstraintLine::PrimaryKey(line.to_string()));
        }

        if let Some(rest) = line.strip_prefix("CONSTRAINT") {
            let definition = rest.trim();
            if let Some(fk_at) = definition.find("FOREIGN KEY") {
                let after = &definition[fk_at + "FOREIGN KEY".len()..];
                let columns = match after.find("REFERENCES") {
                    Some(ref_at) => after[..ref_at].trim(),
                    None => return None,
                };
                return Some(ConstraintLine::ForeignKey {
                    definition: definition.to_string(),
                    columns: columns.to_string(),
                });
            }
            if definition.contains("CHECK") {
                return Some(ConstraintLine::Check(line.to_string()));
            }
            return None;
        }

        if let Some(rest) = strip_key_prefix(line, &["UNIQUE KEY", "UNIQUE INDEX"]) {
            return key_columns(rest).map(|columns| ConstraintLine::Unique { columns });
        }
        if let Some(rest) = strip_key_prefix(line, &["FULLTEXT KEY", "FULLTEXT INDEX"]) {
            return key_columns(rest).map(|columns| ConstraintLine::Fulltext { columns });
        }
        if strip_key_prefix(line, &["KEY", "INDEX", "SPATIAL KEY", "SPATIAL INDEX"]).is_some() {
            return Some(ConstraintLine::PlainIndex);
        }

        None
    }
}

/// Strip one of `prefixes` when it is followed by whitespace or `(`.
fn strip_key_prefix<'a>(line: &'a str, prefixes: &[&str]) -> Option<&'a str> {
    prefixes.iter().find_map(|prefix| {
        let rest = line.strip_prefix(prefix)?;
        match rest.chars().next() {
            Some(c) if c.is_whitespace() || c == '(' => Some(rest.trim_start()),
            _ => None,
        }
    })
}

/// Column names of a key: skip the optional quoted key name, take the first
/// parenthesized list, drop prefix lengths (`"title"(100)` → `"title"`).
fn key_columns(rest: &str) -> Option<Vec<String>> {
    let list_text = match read_quoted_identifier(rest) {
        Some((_, after_name)) => after_name,
        None => rest,
    };
    let list = first_group(list_text)?;

    let columns: Vec<String> = split_top_level(list)
        .into_iter()
        .map(strip_prefix_length)
        .map(str::to_string)
        .collect();

    if columns.is_empty() {
        None
    } else {
        Some(columns)
    }
}

fn strip_prefix_length(column: &str) -> &str {
    match read_quoted_identifier(column) {
        Some((_, rest)) => &column[..column.len() - rest.len()],
        None => column.split('(').next().unwrap_or(column).trim(),
    }
}

/// Statements for a foreign key: the deferrable constraint, then the index on
/// the referencing columns.
pub fn foreign_key_statements(quoted_table: &str, definition: &str, columns: &str) -> [String; 2] {
    [
        format!(
            "ALTER TABLE {} ADD CONSTRAINT {} DEFERRABLE INITIALLY DEFERRED",
            quoted_table, definition
        ),
        format!("CREATE INDEX ON {} {}", quoted_table, columns),
    ]
}

/// Inline clause for a unique key.
pub fn unique_clause(columns: &[String]) -> String {
    format!("UNIQUE ({})", columns.join(","))
}

/// Full-text index statement: the columns are joined with spaces into one
/// document and indexed with GIN over its `tsvector`.
pub fn fulltext_statement(
    quoted_table: &str,
    columns: &[String],
    text_search_config: &str,
) -> String {
    let document = columns
        .iter()
        .map(|c| format!("coalesce({}, '')", c))
        .collect::<Vec<_>>()
        .join(" || ' ' || ");
    format!(
        "CREATE INDEX ON {} USING gin(to_tsvector('{}', {}))",
        quoted_table, text_search_config, document
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_key_kept_verbatim() {
        assert_eq!(
            ConstraintLine::parse("PRIMARY KEY (\"id\"),"),
            Some(ConstraintLine::PrimaryKey("PRIMARY KEY (\"id\")".into()))
        );
    }

    #[test]
    fn test_foreign_key() {
        let parsed = ConstraintLine::parse(
            "CONSTRAINT fk1 FOREIGN KEY (\"a_id\") REFERENCES \"a\" (\"id\"),",
        )
        .unwrap();
        assert_eq!(
            parsed,
            ConstraintLine::ForeignKey {
                definition: "fk1 FOREIGN KEY (\"a_id\") REFERENCES \"a\" (\"id\")".into(),
                columns: "(\"a_id\")".into(),
            }
        );

        let [constraint, index] = foreign_key_statements(
            "\"b\"",
            "fk1 FOREIGN KEY (\"a_id\") REFERENCES \"a\" (\"id\")",
            "(\"a_id\")",
        );
        assert_eq!(
            constraint,
            "ALTER TABLE \"b\" ADD CONSTRAINT fk1 FOREIGN KEY (\"a_id\") REFERENCES \"a\" (\"id\") DEFERRABLE INITIALLY DEFERRED"
        );
        assert_eq!(index, "CREATE INDEX ON \"b\" (\"a_id\")");
    }

    #[test]
    fn test_foreign_key_with_actions() {
        let parsed = ConstraintLine::parse(
            "CONSTRAINT \"fk_x\" FOREIGN KEY (\"a\", \"b\") REFERENCES \"p\" (\"a\", \"b\") ON DELETE CASCADE",
        )
        .unwrap();
        match parsed {
            ConstraintLine::ForeignKey { definition, columns } => {
                assert!(definition.ends_with("ON DELETE CASCADE"));
                assert_eq!(columns, "(\"a\", \"b\")");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_check_constraint_inline() {
        assert_eq!(
            ConstraintLine::parse("CONSTRAINT \"chk_qty\" CHECK ((\"qty\" > 0)),"),
            Some(ConstraintLine::Check("CONSTRAINT \"chk_qty\" CHECK ((\"qty\" > 0))".into()))
        );
    }

    #[test]
    fn test_unique_key() {
        let parsed =
            ConstraintLine::parse("UNIQUE KEY \"email\" (\"email\",\"site_id\"),").unwrap();
        let ConstraintLine::Unique { columns } = parsed else {
            panic!("expected unique key");
        };
        assert_eq!(unique_clause(&columns), "UNIQUE (\"email\",\"site_id\")");
    }

    #[test]
    fn test_unique_key_prefix_lengths_dropped() {
        let parsed =
            ConstraintLine::parse("UNIQUE KEY \"slug\" (\"slug\"(191)) USING BTREE").unwrap();
        assert_eq!(
            parsed,
            ConstraintLine::Unique {
                columns: vec!["\"slug\"".into()]
            }
        );
    }

    #[test]
    fn test_fulltext_key() {
        let parsed = ConstraintLine::parse("FULLTEXT KEY \"search\" (\"title\",\"body\")").unwrap();
        let ConstraintLine::Fulltext { columns } = parsed else {
            panic!("expected fulltext key");
        };
        assert_eq!(
            fulltext_statement("\"posts\"", &columns, "simple"),
            "CREATE INDEX ON \"posts\" USING gin(to_tsvector('simple', coalesce(\"title\", '') || ' ' || coalesce(\"body\", '')))"
        );
    }

    #[test]
    fn test_plain_keys_dropped() {
        assert_eq!(
            ConstraintLine::parse("KEY \"idx_a\" (\"a\"),"),
            Some(ConstraintLine::PlainIndex)
        );
        assert_eq!(
            ConstraintLine::parse("SPATIAL KEY \"g\" (\"geo\")"),
            Some(ConstraintLine::PlainIndex)
        );
    }

    #[test]
    fn test_unrecognized_lines() {
        assert_eq!(ConstraintLine::parse("KEYS are not keys"), None);
        assert_eq!(ConstraintLine::parse("CONSTRAINT odd"), None);
        assert_eq!(ConstraintLine::parse("UNIQUE KEY \"u\""), None);
        assert_eq!(ConstraintLine::parse(");"), None);
    }
}
