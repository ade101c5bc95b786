//! Progress updates printed as JSON lines to stderr.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Lines between two progress updates.
pub const PROGRESS_INTERVAL: usize = 1000;

/// One progress update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Lines read so far.
    pub line: usize,
    /// Total lines in the input, when known.
    pub total_lines: Option<usize>,
    /// Completion percentage, when the total is known.
    pub percent: Option<f64>,
    /// Tables emitted so far.
    pub tables: usize,
    /// Insert statements written so far.
    pub inserts: usize,
    /// Estimated seconds remaining, when the total is known.
    pub eta_seconds: Option<f64>,
}

/// Emits [`ProgressUpdate`]s at a fixed line interval.
#[derive(Debug)]
pub struct ProgressReporter {
    total_lines: Option<usize>,
    started: Instant,
}

impl ProgressReporter {
    pub fn new(total_lines: Option<usize>) -> Self {
        Self {
            total_lines,
            started: Instant::now(),
        }
    }

    /// Whether an update is due after reading `line` lines.
    pub fn is_due(line: usize) -> bool {
        line > 0 && line % PROGRESS_INTERVAL == 0
    }

    /// Build the update for the current position.
    pub fn update(&self, line: usize, tables: usize, inserts: usize) -> ProgressUpdate {
        let elapsed = self.started.elapsed().as_secs_f64();
        let (percent, eta_seconds) = match self.total_lines {
            Some(total) if total > 0 => {
                let fraction = (line as f64 / total as f64).min(1.0);
                let eta = if fraction > 0.0 {
                    Some(elapsed / fraction - elapsed)
                } else {
                    None
                };
                (Some(fraction * 100.0), eta)
            }
            _ => (None, None),
        };

        ProgressUpdate {
            line,
            total_lines: self.total_lines,
            percent,
            tables,
            inserts,
            eta_seconds,
        }
    }

    /// Print the update for the current position to stderr.
    pub fn report(&self, line: usize, tables: usize, inserts: usize) {
        if let Ok(json) = serde_json::to_string(&self.update(line, tables, inserts)) {
            eprintln!("{}", json);
        }
    }
}
