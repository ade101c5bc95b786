//! Zero-date handling for date/time column defaults.
//!
//! MySQL accepts `0000-00-00` (and `YYYY-00-00`) as dates; PostgreSQL does
//! not. Column defaults are rewritten according to the configured
//! [`DateDefault`]; row data is handled by the insert rewriter with the same
//! [`is_zero_date`] test.

use crate::config::DateDefault;

/// Whether a literal's content (without quotes) is a zero date or datetime:
/// `0000-00-00`, `0000-00-00 00:00:00`, `0000-00-00 00:00:00.000000`.
pub fn is_zero_date(content: &str) -> bool {
    content.starts_with("0000-00-00")
        && content
            .chars()
            .all(|c| matches!(c, '0' | '-' | ':' | ' ' | '.'))
}

/// Rewrite `YYYY-00-00...` (non-zero year) to `YYYY-01-01...`.
fn fix_zero_month_day(content: &str) -> Option<String> {
    let year = content.get(..4)?;
    if year == "0000" || !year.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if content.get(4..10)? != "-00-00" {
        return None;
    }
    Some(format!("{}-01-01{}", year, &content[10..]))
}

/// Apply the zero-date policy to the modifier words of a date/time column.
///
/// - `DEFAULT 'YYYY-00-00'` becomes `DEFAULT 'YYYY-01-01'`.
/// - A zero `DEFAULT` becomes the configured literal.
/// - With [`DateDefault::Null`], a `NOT NULL` column with a zero default loses
///   both clauses; a nullable one gets `DEFAULT NULL`.
pub fn apply_date_policy(words: &mut Vec<String>, policy: &DateDefault) {
    let Some(default_idx) = find_default(words) else {
        return;
    };
    let literal = &words[default_idx + 1];
    let Some(content) = literal
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
    else {
        return;
    };

    if let Some(fixed) = fix_zero_month_day(content) {
        words[default_idx + 1] = format!("'{}'", fixed);
        return;
    }
    if !is_zero_date(content) {
        return;
    }

    match (policy, find_not_null(words)) {
        (DateDefault::Null, Some(not_null_idx)) => {
            // Remove the later clause first so the earlier index stays valid
            let (first, second) = if not_null_idx < default_idx {
                (not_null_idx, default_idx)
            } else {
                (default_idx, not_null_idx)
            };
            words.drain(second..second + 2);
            words.drain(first..first + 2);
        }
        _ => words[default_idx + 1] = policy.sql_literal(),
    }
}

fn find_default(words: &[String]) -> Option<usize> {
    words
        .iter()
        .position(|w| w.eq_ignore_ascii_case("DEFAULT"))
        .filter(|&idx| idx + 1 < words.len())
}

fn find_not_null(words: &[String]) -> Option<usize> {
    words.windows(2).position(|pair| {
        pair[0].eq_ignore_ascii_case("NOT") && pair[1].eq_ignore_ascii_case("NULL")
    })
}
