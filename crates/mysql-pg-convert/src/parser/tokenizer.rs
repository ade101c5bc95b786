//! Tokenizer for the column-definition sub-grammar.
//!
//! A column line looks like
//!
//! ```text
//! "status" enum('new','in progress') NOT NULL DEFAULT 'new' COMMENT 'state',
//! ```
//!
//! and is read as a quoted identifier, a type token and a modifier clause. The
//! type token may contain spaces inside its parenthesis group (enum and set
//! members), so it ends at the first whitespace outside any group and outside
//! any string literal.

/// The three parts of a column definition line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnTokens<'a> {
    /// Column name with `""` escapes resolved.
    pub name: String,
    /// Type token, e.g. `varchar(255)`.
    pub type_token: &'a str,
    /// Everything after the type token, trimmed. May be empty.
    pub modifiers: &'a str,
}

/// Read a double-quoted identifier at the start of `input`.
///
/// Returns the unescaped name and the text following the closing quote, or
/// `None` if `input` does not start with a complete quoted identifier.
pub fn read_quoted_identifier(input: &str) -> Option<(String, &str)> {
    let body = input.strip_prefix('"')?;
    let mut name = String::new();
    let mut chars = body.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if c != '"' {
            name.push(c);
            continue;
        }
        if matches!(chars.peek(), Some((_, '"'))) {
            name.push('"');
            chars.next();
            continue;
        }
        return Some((name, &body[idx + 1..]));
    }

    None
}

/// Split a column line (without its trailing comma) into its parts.
///
/// If the type token never closes its parenthesis group or string literal,
/// the whole remainder is taken as the type and the modifiers are empty.
pub fn tokenize_column(line: &str) -> Option<ColumnTokens<'_>> {
    let (name, rest) = read_quoted_identifier(line)?;
    let rest = rest.trim();

    let (type_token, modifiers) = match type_token_end(rest) {
        Some(end) => (&rest[..end], rest[end..].trim()),
        None => (rest, ""),
    };

    Some(ColumnTokens {
        name,
        type_token,
        modifiers,
    })
}

/// Byte offset where the type token ends, or `None` if it runs to the end of
/// the input (either complete or unbalanced).
fn type_token_end(text: &str) -> Option<usize> {
    let mut scanner = Scanner::default();
    for (idx, c) in text.char_indices() {
        if c.is_whitespace() && scanner.at_top_level() {
            return Some(idx);
        }
        scanner.feed(c);
    }
    None
}

/// Split modifier text into words. String literals, quoted identifiers and
/// parenthesis groups are kept whole, so `DEFAULT 'a b'` is two words.
pub fn split_words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut scanner = Scanner::default();
    let mut start: Option<usize> = None;

    for (idx, c) in text.char_indices() {
        if c.is_whitespace() && scanner.at_top_level() {
            if let Some(s) = start.take() {
                words.push(&text[s..idx]);
            }
            continue;
        }
        if start.is_none() {
            start = Some(idx);
        }
        scanner.feed(c);
    }

    if let Some(s) = start {
        words.push(&text[s..]);
    }
    words
}

/// Split a list at top-level commas, trimming each item.
pub fn split_top_level(list: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut scanner = Scanner::default();
    let mut start = 0;

    for (idx, c) in list.char_indices() {
        if c == ',' && scanner.at_top_level() {
            items.push(list[start..idx].trim());
            start = idx + 1;
            continue;
        }
        scanner.feed(c);
    }

    let last = list[start..].trim();
    if !last.is_empty() {
        items.push(last);
    }
    items
}

/// Content of the parenthesis group starting at the first `(` in `text`,
/// without the outer parentheses.
pub fn first_group(text: &str) -> Option<&str> {
    let open = text.find('(')?;
    let mut scanner = Scanner::default();

    for (idx, c) in text[open..].char_indices() {
        scanner.feed(c);
        if idx > 0 && scanner.at_top_level() && c == ')' {
            return Some(&text[open + 1..open + idx]);
        }
    }
    None
}

/// Tracks nesting of parentheses, string literals and quoted identifiers.
///
/// A doubled quote inside a literal toggles the state twice, which leaves it
/// inside the literal, so `''` escapes need no special handling.
#[derive(Debug, Default)]
struct Scanner {
    depth: usize,
    in_literal: bool,
    in_identifier: bool,
}

impl Scanner {
    fn feed(&mut self, c: char) {
        match c {
            '\'' if !self.in_identifier => self.in_literal = !self.in_literal,
            '"' if !self.in_literal => self.in_identifier = !self.in_identifier,
            '(' if !self.in_literal && !self.in_identifier => self.depth += 1,
            ')' if !self.in_literal && !self.in_identifier => {
                self.depth = self.depth.saturating_sub(1)
            }
            _ => {}
        }
    }

    fn at_top_level(&self) -> bool {
        self.depth == 0 && !self.in_literal && !self.in_identifier
    }
}
