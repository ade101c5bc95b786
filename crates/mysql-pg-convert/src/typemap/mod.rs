//! Type mapping from MySQL column types to PostgreSQL.
//!
//! The input is the raw type token of a column definition as mysqldump writes
//! it (`int(11)`, `varchar(255)`, `enum('a','b')`). The mapping is a pure
//! function; everything that depends on the table or column name (enum type
//! names, sequences, casts) is built by the column parser from the returned
//! [`TypeMapping`].

/// The PostgreSQL type a column is declared with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetType {
    /// A concrete type name, written into the column declaration as-is.
    Plain(String),
    /// A named enum type that has to be created for this column.
    /// Members keep their quotes: `'a'`, `'b c'`.
    Enumeration { members: Vec<String> },
}

/// Result of mapping one type token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMapping {
    /// Type used in `CREATE TABLE`.
    pub target: TargetType,

    /// Type the column is converted to after the data load, if any.
    pub deferred_cast: Option<&'static str>,

    /// Integer family that can back an `id` sequence.
    pub sequence_eligible: bool,

    /// Date/time type whose zero-date defaults need rewriting.
    pub temporal: bool,
}

impl TypeMapping {
    fn plain(target: impl Into<String>) -> Self {
        Self {
            target: TargetType::Plain(target.into()),
            deferred_cast: None,
            sequence_eligible: false,
            temporal: false,
        }
    }

    fn integer(target: impl Into<String>) -> Self {
        Self {
            sequence_eligible: true,
            ..Self::plain(target)
        }
    }

    fn temporal(target: impl Into<String>) -> Self {
        Self {
            temporal: true,
            ..Self::plain(target)
        }
    }

    fn enumeration(members: Vec<String>) -> Self {
        Self {
            target: TargetType::Enumeration { members },
            deferred_cast: None,
            sequence_eligible: false,
            temporal: false,
        }
    }

    fn with_cast(mut self, cast: &'static str) -> Self {
        self.deferred_cast = Some(cast);
        self
    }
}

/// Map a MySQL type token to PostgreSQL.
///
/// Unknown types are passed through unchanged.
pub fn mysql_to_postgres(type_token: &str) -> TypeMapping {
    let (base, args) = split_type_token(type_token);
    let base = base.to_ascii_lowercase();

    match (base.as_str(), args) {
        // MySQL stores booleans as TINYINT(1). The literal 0/1 data only loads
        // into an integer column, so the boolean type is applied after the load.
        ("tinyint", Some(_)) => TypeMapping::integer("int4").with_cast("boolean"),
        ("tinyint", None) | ("smallint", _) => TypeMapping::integer("int2"),
        ("int" | "integer" | "mediumint", _) => TypeMapping::integer("integer"),
        ("bigint", _) => TypeMapping::integer("bigint"),

        ("tinytext" | "mediumtext" | "longtext", None) => TypeMapping::plain("text"),

        // MySQL sizes VARCHAR in characters of a possibly single-byte charset;
        // doubling leaves room for the multi-byte expansion.
        ("varchar", Some(size)) => match size
            .trim()
            .parse::<u64>()
            .ok()
            .and_then(|n| n.checked_mul(2))
        {
            Some(doubled) => TypeMapping::plain(format!("varchar({})", doubled)),
            None => TypeMapping::plain(type_token),
        },

        ("datetime", None) => TypeMapping::temporal("timestamp with time zone"),
        ("datetime", Some(precision)) => {
            TypeMapping::temporal(format!("timestamp({}) with time zone", precision.trim()))
        }
        ("date", None) => TypeMapping::temporal("date"),
        ("timestamp", _) => TypeMapping::temporal(type_token),

        ("double", _) => TypeMapping::plain("double precision"),

        ("tinyblob" | "blob" | "mediumblob" | "longblob", None) => TypeMapping::plain("bytea"),

        ("enum" | "set", Some(members)) => TypeMapping::enumeration(split_members(members)),

        _ => TypeMapping::plain(type_token),
    }
}

/// Split `name(args)` into its name and argument text.
///
/// A token without parentheses, or whose parenthesis group is not closed at
/// the very end, has no arguments.
fn split_type_token(token: &str) -> (&str, Option<&str>) {
    match token.find('(') {
        Some(open) if token.ends_with(')') => {
            (&token[..open], Some(&token[open + 1..token.len() - 1]))
        }
        Some(open) => (&token[..open], None),
        None => (token, None),
    }
}

/// Split an enum/set member list at commas that are not inside a literal.
pub fn split_members(list: &str) -> Vec<String> {
    let mut members = Vec::new();
    let mut current = String::new();
    let mut in_literal = false;
    let mut chars = list.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' if in_literal && chars.peek() == Some(&'\'') => {
                current.push_str("''");
                chars.next();
            }
            '\'' => {
                in_literal = !in_literal;
                current.push(c);
            }
            ',' if !in_literal => {
                members.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    if !current.trim().is_empty() {
        members.push(current.trim().to_string());
    }
    members
}
