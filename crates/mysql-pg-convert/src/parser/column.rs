//! Column definition parsing and translation.

use super::dates::apply_date_policy;
use super::tokenizer::{split_words, tokenize_column};
use crate::config::ConvertConfig;
use crate::core::{quote_pg, Column, Table};
use crate::error::Result;
use crate::typemap::{mysql_to_postgres, TargetType};

/// A column line split into its parts, with MySQL-only modifiers removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub name: String,
    pub type_token: String,
    /// Remaining modifier words, in order.
    pub modifiers: Vec<String>,
    /// `COMMENT` literal, including its quotes.
    pub comment: Option<String>,
}

impl ColumnDefinition {
    /// Parse a normalized column line. Returns `None` if the line does not
    /// start with a complete quoted identifier.
    pub fn parse(line: &str) -> Option<Self> {
        let tokens = tokenize_column(line.trim_end_matches(',').trim_end())?;
        let words = split_words(tokens.modifiers);

        let mut modifiers = Vec::with_capacity(words.len());
        let mut comment = None;
        let mut idx = 0;

        while idx < words.len() {
            let word = words[idx];
            let next_is = |expected: &str| {
                words
                    .get(idx + 1)
                    .is_some_and(|w| w.eq_ignore_ascii_case(expected))
            };

            if word.eq_ignore_ascii_case("unsigned")
                || word.eq_ignore_ascii_case("zerofill")
                || word.eq_ignore_ascii_case("AUTO_INCREMENT")
            {
                idx += 1;
            } else if word.eq_ignore_ascii_case("CHARACTER") && next_is("SET") {
                idx += 3;
            } else if word.eq_ignore_ascii_case("CHARSET")
                || word.eq_ignore_ascii_case("COLLATE")
            {
                idx += 2;
            } else if word.eq_ignore_ascii_case("ON") && next_is("UPDATE") {
                idx += 3;
            } else if word.eq_ignore_ascii_case("COMMENT") && idx + 1 < words.len() {
                comment = Some(words[idx + 1].to_string());
                idx += 2;
            } else {
                modifiers.push(word.to_string());
                idx += 1;
            }
        }

        Some(Self {
            name: tokens.name,
            type_token: tokens.type_token.to_string(),
            modifiers,
            comment,
        })
    }
}

/// Enum type required by a column, to be registered before the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumRequest {
    pub members: Vec<String>,
}

/// Everything a column contributes to the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedColumn {
    pub column: Column,
    /// Set when the column's type is a synthesized enum. The column's
    /// `data_type` must then be set to the registered type name.
    pub enum_request: Option<EnumRequest>,
    /// Post-load cast statement.
    pub cast: Option<String>,
    /// Sequence create / seed / default statements.
    pub sequence: Option<[String; 3]>,
    /// `COMMENT ON COLUMN` statement.
    pub comment: Option<String>,
}

/// Translate a parsed column of `table`. The column is not added to it.
///
/// For enum columns the returned `data_type` is empty until the caller fills
/// it in with the registered type name.
pub fn translate_column(
    def: ColumnDefinition,
    table: &Table,
    config: &ConvertConfig,
) -> Result<TranslatedColumn> {
    let quoted_table = quote_pg(&table.name)?;
    let quoted_column = quote_pg(&def.name)?;
    let mapping = mysql_to_postgres(&def.type_token);

    let mut modifiers = def.modifiers;
    if mapping.temporal {
        apply_date_policy(&mut modifiers, &config.invalid_date_default);
    }

    let (data_type, enum_request) = match mapping.target {
        TargetType::Plain(t) => (t, None),
        TargetType::Enumeration { members } => (String::new(), Some(EnumRequest { members })),
    };

    let cast = mapping.deferred_cast.map(|cast| {
        format!(
            "ALTER TABLE {t} ALTER COLUMN {c} DROP DEFAULT, ALTER COLUMN {c} TYPE {cast} USING CAST({c} as {cast})",
            t = quoted_table,
            c = quoted_column,
            cast = cast
        )
    });

    let sequence = if def.name == "id" && mapping.sequence_eligible {
        let seq = quote_pg(&table.id_sequence_name())?;
        Some([
            format!("CREATE SEQUENCE {}", seq),
            format!(
                "SELECT setval('{}', max({})) FROM {}",
                seq.replace('\'', "''"),
                quoted_column,
                quoted_table
            ),
            format!(
                "ALTER TABLE {} ALTER COLUMN {} SET DEFAULT nextval('{}')",
                quoted_table,
                quoted_column,
                seq.replace('\'', "''")
            ),
        ])
    } else {
        None
    };

    let comment = def.comment.map(|literal| {
        format!("COMMENT ON COLUMN {}.{} IS {}", quoted_table, quoted_column, literal)
    });

    Ok(TranslatedColumn {
        column: Column {
            name: def.name,
            data_type,
            modifiers: modifiers.join(" "),
        },
        enum_request,
        cast,
        sequence,
        comment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DateDefault;

    fn translate(line: &str, table: &str) -> TranslatedColumn {
        let def = ColumnDefinition::parse(line).unwrap();
        translate_column(def, &Table::new(table), &ConvertConfig::default()).unwrap()
    }

    #[test]
    fn test_parse_strips_mysql_modifiers() {
        let def = ColumnDefinition::parse(
            "\"name\" varchar(50) CHARACTER SET latin1 COLLATE latin1_bin NOT NULL DEFAULT '',",
        )
        .unwrap();
        assert_eq!(def.name, "name");
        assert_eq!(def.type_token, "varchar(50)");
        assert_eq!(def.modifiers, vec!["NOT", "NULL", "DEFAULT", "''"]);
        assert_eq!(def.comment, None);
    }

    #[test]
    fn test_parse_unsigned_and_auto_increment() {
        let def =
            ColumnDefinition::parse("\"id\" int(10) unsigned NOT NULL AUTO_INCREMENT,").unwrap();
        assert_eq!(def.modifiers, vec!["NOT", "NULL"]);
    }

    #[test]
    fn test_parse_on_update() {
        let def = ColumnDefinition::parse(
            "\"updated\" timestamp NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,",
        )
        .unwrap();
        assert_eq!(def.modifiers, vec!["NOT", "NULL", "DEFAULT", "CURRENT_TIMESTAMP"]);
    }

    #[test]
    fn test_parse_captures_comment() {
        let def = ColumnDefinition::parse(
            "\"age\" int(11) DEFAULT NULL COMMENT 'age in years, ''approx''',",
        )
        .unwrap();
        assert_eq!(def.modifiers, vec!["DEFAULT", "NULL"]);
        assert_eq!(def.comment.as_deref(), Some("'age in years, ''approx'''"));
    }

    #[test]
    fn test_parse_keeps_unsigned_inside_default_literal() {
        let def = ColumnDefinition::parse("\"kind\" varchar(20) DEFAULT 'unsigned value'").unwrap();
        assert_eq!(def.modifiers, vec!["DEFAULT", "'unsigned value'"]);
    }

    #[test]
    fn test_id_column_gets_sequence() {
        let translated = translate("\"id\" int(11) NOT NULL,", "t");
        assert_eq!(translated.column.declaration().unwrap(), "\"id\" integer NOT NULL");
        let [create, seed, default] = translated.sequence.unwrap();
        assert_eq!(create, "CREATE SEQUENCE \"t_id_seq\"");
        assert_eq!(seed, "SELECT setval('\"t_id_seq\"', max(\"id\")) FROM \"t\"");
        assert_eq!(
            default,
            "ALTER TABLE \"t\" ALTER COLUMN \"id\" SET DEFAULT nextval('\"t_id_seq\"')"
        );
    }

    #[test]
    fn test_non_integer_id_has_no_sequence() {
        assert!(translate("\"id\" varchar(36) NOT NULL", "t").sequence.is_none());
        assert!(translate("\"user_id\" int(11) NOT NULL", "t").sequence.is_none());
    }

    #[test]
    fn test_tinyint_gets_cast() {
        let translated = translate("\"active\" tinyint(1) NOT NULL DEFAULT '1',", "users");
        assert_eq!(translated.column.data_type, "int4");
        assert_eq!(
            translated.cast.unwrap(),
            "ALTER TABLE \"users\" ALTER COLUMN \"active\" DROP DEFAULT, ALTER COLUMN \"active\" TYPE boolean USING CAST(\"active\" as boolean)"
        );
    }

    #[test]
    fn test_declaration_without_modifiers() {
        let translated = translate("\"body\" longtext,", "posts");
        assert_eq!(translated.column.declaration().unwrap(), "\"body\" text");
    }

    #[test]
    fn test_comment_statement() {
        let translated = translate("\"age\" int(11) COMMENT 'years'", "people");
        assert_eq!(
            translated.comment.unwrap(),
            "COMMENT ON COLUMN \"people\".\"age\" IS 'years'"
        );
    }

    #[test]
    fn test_enum_column_requests_type() {
        let translated = translate(
            "\"status\" enum('draft','live') NOT NULL DEFAULT 'draft',",
            "posts",
        );
        assert_eq!(
            translated.enum_request,
            Some(EnumRequest {
                members: vec!["'draft'".into(), "'live'".into()]
            })
        );
        assert_eq!(translated.column.modifiers, "NOT NULL DEFAULT 'draft'");
    }

    #[test]
    fn test_date_policy_applied_to_temporal_columns() {
        let translated = translate("\"born\" date NOT NULL DEFAULT '0000-00-00',", "people");
        assert_eq!(translated.column.declaration().unwrap(), "\"born\" date");

        let def =
            ColumnDefinition::parse("\"seen\" datetime NOT NULL DEFAULT '0000-00-00 00:00:00'")
                .unwrap();
        let config = ConvertConfig::default()
            .with_invalid_date_default(DateDefault::Value("1970-01-01".into()));
        let translated = translate_column(def, &Table::new("people"), &config).unwrap();
        assert_eq!(
            translated.column.declaration().unwrap(),
            "\"seen\" timestamp with time zone NOT NULL DEFAULT '1970-01-01'"
        );
    }

    #[test]
    fn test_date_policy_not_applied_to_text_columns() {
        let translated = translate("\"raw\" varchar(19) NOT NULL DEFAULT '0000-00-00'", "t");
        assert_eq!(translated.column.modifiers, "NOT NULL DEFAULT '0000-00-00'");
    }
}
