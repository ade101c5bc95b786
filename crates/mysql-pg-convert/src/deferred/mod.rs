//! Statements held back until every table and row has been written.

use std::fmt::Write;

/// Four append-only buckets, written once after the data section.
#[derive(Debug, Default, Clone)]
pub struct DeferredStatements {
    casts: Vec<String>,
    foreign_keys: Vec<String>,
    sequences: Vec<String>,
    fulltext: Vec<String>,
}

impl DeferredStatements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_cast(&mut self, statement: String) {
        self.casts.push(statement);
    }

    /// Add a foreign key constraint and its supporting index, in that order.
    pub fn push_foreign_key(&mut self, [constraint, index]: [String; 2]) {
        self.foreign_keys.push(constraint);
        self.foreign_keys.push(index);
    }

    /// Add a create / seed / default sequence triple.
    pub fn push_sequence(&mut self, statements: [String; 3]) {
        self.sequences.extend(statements);
    }

    pub fn push_fulltext(&mut self, statement: String) {
        self.fulltext.push(statement);
    }

    pub fn cast_count(&self) -> usize {
        self.casts.len()
    }

    /// Number of foreign key constraints (each one also carries an index).
    pub fn foreign_key_count(&self) -> usize {
        self.foreign_keys.len() / 2
    }

    /// Number of sequences (each one is three statements).
    pub fn sequence_count(&self) -> usize {
        self.sequences.len() / 3
    }

    pub fn fulltext_count(&self) -> usize {
        self.fulltext.len()
    }

    /// Write all buckets under their section headers. Consumes the collector.
    pub fn write_into(self, out: &mut String) {
        let sections = [
            ("Typecasts", self.casts),
            ("Foreign keys", self.foreign_keys),
            ("Sequences", self.sequences),
            ("Full Text keys", self.fulltext),
        ];

        for (title, statements) in sections {
            let _ = write!(out, "\n-- {} --\n", title);
            for statement in statements {
                out.push_str(&statement);
                out.push_str(";\n");
            }
        }
    }
}
