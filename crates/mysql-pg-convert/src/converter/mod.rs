//! Streaming conversion driver.

mod context;
mod progress;
mod report;

pub use context::{ParseContext, HEADER};
pub use progress::{ProgressReporter, ProgressUpdate, PROGRESS_INTERVAL};
pub use report::{ConversionReport, SkipContext, SkippedLine};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::info;

use crate::config::ConvertConfig;
use crate::error::Result;

/// Output is handed to the writer once the buffer grows past this size.
const FLUSH_THRESHOLD: usize = 64 * 1024;

/// Converts a mysqldump stream into a PostgreSQL load script.
pub struct Converter {
    config: ConvertConfig,
    progress: Option<ProgressReporter>,
}

impl Converter {
    /// Create a new converter.
    pub fn new(config: ConvertConfig) -> Self {
        Self {
            config,
            progress: None,
        }
    }

    /// Print progress updates to stderr while converting.
    pub fn with_progress(mut self, reporter: ProgressReporter) -> Self {
        self.progress = Some(reporter);
        self
    }

    /// Run the conversion over a full input stream.
    ///
    /// Output produced before a failure is still written, but the closing
    /// `COMMIT` is only written on success.
    pub async fn run<R, W>(self, mut reader: R, mut writer: W) -> Result<ConversionReport>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(
            "Starting conversion (invalid date default: {}, text search config: {})",
            self.config.invalid_date_default, self.config.fulltext_config
        );

        let mut ctx = ParseContext::new(self.config);
        let mut out = String::with_capacity(FLUSH_THRESHOLD);
        out.push_str(HEADER);

        let mut buf = Vec::new();
        let mut line_number = 0;

        let processed: Result<()> = loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break Ok(());
            }
            line_number += 1;

            let raw = String::from_utf8_lossy(&buf);
            if let Err(e) = ctx.process_line(line_number, &raw, &mut out) {
                break Err(e);
            }

            if out.len() >= FLUSH_THRESHOLD {
                writer.write_all(out.as_bytes()).await?;
                out.clear();
            }

            if let Some(ref reporter) = self.progress {
                if ProgressReporter::is_due(line_number) {
                    reporter.report(line_number, ctx.tables(), ctx.inserts());
                }
            }
        };

        let result = processed.and_then(|()| {
            if let Some(ref reporter) = self.progress {
                reporter.report(ctx.lines_read(), ctx.tables(), ctx.inserts());
            }
            ctx.finish(&mut out)
        });

        writer.write_all(out.as_bytes()).await?;
        writer.flush().await?;

        let report = result?;
        info!(
            "Conversion complete: {} tables, {} inserts, {} skipped lines in {:.2}s",
            report.tables,
            report.inserts,
            report.skipped_lines.len(),
            report.duration_seconds
        );
        Ok(report)
    }
}
