//! Row insertion rewriting.

use std::borrow::Cow;

use super::dates::is_zero_date;
use crate::config::DateDefault;

/// Replace every zero-date literal value in an `INSERT` line with the
/// configured default. Everything else is returned byte for byte.
///
/// Only complete string literals are considered, so text that merely contains
/// `0000-00-00` inside a longer string is left alone.
pub fn rewrite_insert<'a>(line: &'a str, policy: &DateDefault) -> Cow<'a, str> {
    let mut out: Option<String> = None;
    let mut copied = 0;
    let bytes = line.as_bytes();
    let mut idx = 0;

    while idx < bytes.len() {
        match bytes[idx] {
            b'\'' => {
                let Some(end) = literal_end(bytes, idx) else {
                    break;
                };
                if is_zero_date(&line[idx + 1..end - 1]) {
                    let buf = out.get_or_insert_with(|| String::with_capacity(line.len()));
                    buf.push_str(&line[copied..idx]);
                    buf.push_str(&policy.sql_literal());
                    copied = end;
                }
                idx = end;
            }
            b'"' => {
                idx = match line[idx + 1..].find('"') {
                    Some(offset) => idx + offset + 2,
                    None => bytes.len(),
                };
            }
            _ => idx += 1,
        }
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&line[copied..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(line),
    }
}

/// Index one past the closing quote of the literal opening at `start`, or
/// `None` if the literal is not terminated on this line.
pub(crate) fn literal_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut idx = start + 1;
    while idx < bytes.len() {
        if bytes[idx] == b'\'' {
            if bytes.get(idx + 1) == Some(&b'\'') {
                idx += 2;
                continue;
            }
            return Some(idx + 1);
        }
        idx += 1;
    }
    None
}
