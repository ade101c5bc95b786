//! Per-run parse state and the table assembly state machine.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::report::{ConversionReport, SkipContext, SkippedLine};
use crate::config::ConvertConfig;
use crate::core::{quote_pg, validate_identifier, Table};
use crate::deferred::DeferredStatements;
use crate::error::{ConvertError, Result};
use crate::parser::insert::literal_end;
use crate::parser::tokenizer::read_quoted_identifier;
use crate::parser::{
    foreign_key_statements, fulltext_statement, is_ignorable, normalize_line, rewrite_insert,
    translate_column, unique_clause, ColumnDefinition, ConstraintLine, EnumRegistry,
};

/// Written before anything else.
pub const HEADER: &str = "-- Converted by mysql-pg-convert\n\
START TRANSACTION;\n\
SET standard_conforming_strings=off;\n\
SET escape_string_warning=off;\n\
SET CONSTRAINTS ALL DEFERRED;\n\n";

const POST_DATA: &str = "\n-- Post-data save --\nCOMMIT;\nSTART TRANSACTION;\n";

/// Table being assembled between `CREATE TABLE` and its closing line.
#[derive(Debug)]
struct TableBuilder {
    table: Table,
    quoted_name: String,
    comments: Vec<String>,
    opened_at: usize,
}

#[derive(Debug, Default)]
enum TableState {
    #[default]
    Outside,
    Inside(TableBuilder),
}

/// All state of one conversion run.
///
/// Lines are fed one at a time through [`ParseContext::process_line`], which
/// appends any immediate output to the caller's buffer. [`ParseContext::finish`]
/// writes the deferred section and produces the report.
#[derive(Debug)]
pub struct ParseContext {
    config: ConvertConfig,
    state: TableState,
    enums: EnumRegistry,
    deferred: DeferredStatements,
    started_at: DateTime<Utc>,
    lines_read: usize,
    tables: usize,
    inserts: usize,
    skipped: Vec<SkippedLine>,
}

impl ParseContext {
    pub fn new(config: ConvertConfig) -> Self {
        Self {
            config,
            state: TableState::Outside,
            enums: EnumRegistry::new(),
            deferred: DeferredStatements::new(),
            started_at: Utc::now(),
            lines_read: 0,
            tables: 0,
            inserts: 0,
            skipped: Vec::new(),
        }
    }

    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    pub fn tables(&self) -> usize {
        self.tables
    }

    pub fn inserts(&self) -> usize {
        self.inserts
    }

    pub fn skipped_lines(&self) -> &[SkippedLine] {
        &self.skipped
    }

    /// Name of the table currently being assembled.
    pub fn open_table(&self) -> Option<&str> {
        match &self.state {
            TableState::Outside => None,
            TableState::Inside(builder) => Some(&builder.table.name),
        }
    }

    /// Process one raw input line (1-based `line_number`).
    pub fn process_line(&mut self, line_number: usize, raw: &str, out: &mut String) -> Result<()> {
        self.lines_read = line_number;

        let line = normalize_line(raw);
        if is_ignorable(&line) {
            return Ok(());
        }

        match std::mem::take(&mut self.state) {
            TableState::Outside => self.process_top_level(line_number, line, out),
            TableState::Inside(builder) => {
                self.process_table_line(line_number, line, builder, out)
            }
        }
    }

    fn process_top_level(
        &mut self,
        line_number: usize,
        line: String,
        out: &mut String,
    ) -> Result<()> {
        if line.starts_with("CREATE TABLE") {
            let Some(name) = table_name(&line) else {
                self.skip(line_number, line, SkipContext::TopLevel, None);
                return Ok(());
            };
            let quoted_name = quote_pg(&name)?;
            debug!("Opening table {}", quoted_name);
            self.state = TableState::Inside(TableBuilder {
                table: Table::new(name),
                quoted_name,
                comments: Vec::new(),
                opened_at: line_number,
            });
        } else if line.starts_with("INSERT INTO") {
            out.push_str(&rewrite_insert(&line, &self.config.invalid_date_default));
            out.push('\n');
            self.inserts += 1;
        } else {
            self.skip(line_number, line, SkipContext::TopLevel, None);
        }
        Ok(())
    }

    fn process_table_line(
        &mut self,
        line_number: usize,
        line: String,
        mut builder: TableBuilder,
        out: &mut String,
    ) -> Result<()> {
        if line.starts_with('"') {
            match ColumnDefinition::parse(&line) {
                Some(def) if validate_identifier(&def.name).is_ok() => {
                    self.add_column(def, &mut builder, out)?;
                }
                _ => {
                    let table = builder.table.name.clone();
                    self.skip(line_number, line, SkipContext::InsideTable, Some(table));
                }
            }
        } else if line.starts_with(')') {
            // Partitioned tables end with `) ENGINE=...` and no `;`; the
            // partition clause follows as a `/*!50100 ... */;` comment line.
            if let Some(comment) = table_comment(&line) {
                builder
                    .comments
                    .push(format!("COMMENT ON TABLE {} IS {}", builder.quoted_name, comment));
            }
            return self.emit_table(builder, out);
        } else {
            match ConstraintLine::parse(&line) {
                Some(ConstraintLine::PrimaryKey(clause)) | Some(ConstraintLine::Check(clause)) => {
                    builder.table.constraints.push(clause);
                }
                Some(ConstraintLine::ForeignKey { definition, columns }) => {
                    self.deferred.push_foreign_key(foreign_key_statements(
                        &builder.quoted_name,
                        &definition,
                        &columns,
                    ));
                }
                Some(ConstraintLine::Unique { columns }) => {
                    builder.table.constraints.push(unique_clause(&columns));
                }
                Some(ConstraintLine::Fulltext { columns }) => {
                    self.deferred.push_fulltext(fulltext_statement(
                        &builder.quoted_name,
                        &columns,
                        &self.config.fulltext_config,
                    ));
                }
                Some(ConstraintLine::PlainIndex) => {}
                None => {
                    let table = builder.table.name.clone();
                    self.skip(line_number, line, SkipContext::InsideTable, Some(table));
                }
            }
        }

        self.state = TableState::Inside(builder);
        Ok(())
    }

    fn add_column(
        &mut self,
        def: ColumnDefinition,
        builder: &mut TableBuilder,
        out: &mut String,
    ) -> Result<()> {
        let mut translated = translate_column(def, &builder.table, &self.config)?;

        if let Some(request) = translated.enum_request.take() {
            let (type_name, statements) =
                self.enums
                    .register(&builder.table.name, &translated.column.name, &request.members)?;
            if let Some(statements) = statements {
                for statement in statements {
                    out.push_str(&statement);
                    out.push_str(";\n");
                }
            }
            translated.column.data_type = type_name;
        }

        if let Some(cast) = translated.cast.take() {
            self.deferred.push_cast(cast);
        }
        if let Some(sequence) = translated.sequence.take() {
            self.deferred.push_sequence(sequence);
        }
        if let Some(comment) = translated.comment.take() {
            builder.comments.push(comment);
        }

        builder.table.columns.push(translated.column);
        Ok(())
    }

    fn emit_table(&mut self, builder: TableBuilder, out: &mut String) -> Result<()> {
        out.push_str(&builder.table.create_statement()?);

        for comment in &builder.comments {
            out.push_str(comment);
            out.push_str(";\n");
        }
        out.push('\n');

        debug!(
            "Emitted table {} ({} columns, {} comments)",
            builder.quoted_name,
            builder.table.columns.len(),
            builder.comments.len()
        );
        self.tables += 1;
        Ok(())
    }

    fn skip(
        &mut self,
        line_number: usize,
        line: String,
        context: SkipContext,
        table: Option<String>,
    ) {
        match &table {
            Some(t) => warn!(
                "Line {}: skipping unrecognized line in table \"{}\": {}",
                line_number, t, line
            ),
            None => warn!("Line {}: skipping unrecognized line: {}", line_number, line),
        }
        self.skipped.push(SkippedLine {
            line_number,
            line,
            context,
            table,
        });
    }

    /// End the run: write the post-data section and build the report.
    ///
    /// Fails without writing anything if a table is still open.
    pub fn finish(self, out: &mut String) -> Result<ConversionReport> {
        if let TableState::Inside(builder) = self.state {
            warn!(
                "Input ended inside table \"{}\" opened at line {}",
                builder.table.name, builder.opened_at
            );
            return Err(ConvertError::unterminated(builder.table.name, builder.opened_at));
        }

        let casts = self.deferred.cast_count();
        let foreign_keys = self.deferred.foreign_key_count();
        let sequences = self.deferred.sequence_count();
        let fulltext_indexes = self.deferred.fulltext_count();

        out.push_str(POST_DATA);
        self.deferred.write_into(out);
        out.push_str("\nCOMMIT;\n");

        let completed_at = Utc::now();
        let duration_seconds =
            (completed_at - self.started_at).num_milliseconds().max(0) as f64 / 1000.0;

        Ok(ConversionReport {
            started_at: self.started_at,
            completed_at,
            duration_seconds,
            lines_read: self.lines_read,
            tables: self.tables,
            inserts: self.inserts,
            enum_types: self.enums.declared_count(),
            casts,
            foreign_keys,
            sequences,
            fulltext_indexes,
            skipped_lines: self.skipped,
        })
    }
}

/// Quoted table name of a `CREATE TABLE` line.
fn table_name(line: &str) -> Option<String> {
    let rest = line.strip_prefix("CREATE TABLE")?.trim_start();
    let rest = rest
        .strip_prefix("IF NOT EXISTS")
        .map(str::trim_start)
        .unwrap_or(rest);
    let (name, _) = read_quoted_identifier(rest)?;
    (!name.is_empty()).then_some(name)
}

/// `COMMENT='...'` literal from the table options of a closing line.
fn table_comment(line: &str) -> Option<&str> {
    let start = line.find("COMMENT=")? + "COMMENT=".len();
    if !line[start..].starts_with('\'') {
        return None;
    }
    let end = literal_end(line.as_bytes(), start)?;
    Some(&line[start..end])
}
