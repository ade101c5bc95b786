//! mysql-pg-convert CLI - mysqldump to PostgreSQL script conversion.

use clap::Parser;
use mysql_pg_convert::{
    ConversionReport, ConvertConfig, ConvertError, Converter, DateDefault, ProgressReporter,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncReadExt, AsyncWrite, BufReader, BufWriter};
use tracing::{info, Level};
use tracing_subscriber::fmt::format::FmtSpan;

/// Path argument selecting standard input or output.
const STDIO: &str = "-";

#[derive(Parser)]
#[command(name = "mysql-pg-convert")]
#[command(about = "Convert mysqldump output into a PostgreSQL load script")]
#[command(version)]
struct Cli {
    /// mysqldump file to read, or - for stdin
    input: String,

    /// PostgreSQL script to write, or - for stdout
    output: String,

    /// Path to YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Replacement for zero dates: a date literal, or null
    #[arg(long)]
    invalid_date_default: Option<String>,

    /// Text search configuration for FULLTEXT indexes
    #[arg(long)]
    fulltext_config: Option<String>,

    /// Do not print progress updates to stderr
    #[arg(long)]
    no_progress: bool,

    /// Output JSON report instead of a summary
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), ConvertError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format).map_err(ConvertError::Config)?;

    let mut config = match cli.config {
        Some(ref path) => {
            let config = ConvertConfig::load(path)?;
            info!("Loaded configuration from {:?}", path);
            config
        }
        None => ConvertConfig::default(),
    };

    // Flags override the file
    if let Some(ref value) = cli.invalid_date_default {
        config.invalid_date_default = DateDefault::parse(value);
    }
    if let Some(ref name) = cli.fulltext_config {
        config.fulltext_config = name.clone();
    }
    config.validate()?;

    let from_stdin = cli.input == STDIO;
    let to_stdout = cli.output == STDIO;

    // Open the input before creating the output so a bad path leaves nothing behind
    let reader: Box<dyn AsyncBufRead + Unpin> = if from_stdin {
        Box::new(BufReader::new(tokio::io::stdin()))
    } else {
        Box::new(BufReader::new(File::open(&cli.input).await?))
    };

    let mut converter = Converter::new(config);
    if !cli.no_progress && !to_stdout {
        let total_lines = if from_stdin {
            None
        } else {
            Some(count_lines(&cli.input).await?)
        };
        converter = converter.with_progress(ProgressReporter::new(total_lines));
    }

    let writer: Box<dyn AsyncWrite + Unpin> = if to_stdout {
        Box::new(BufWriter::new(tokio::io::stdout()))
    } else {
        Box::new(BufWriter::new(File::create(&cli.output).await?))
    };

    let report = converter.run(reader, writer).await?;

    let summary = if cli.output_json {
        report.to_json()?
    } else {
        format_summary(&report)
    };

    // Keep stdout clean when it carries the script
    if to_stdout {
        eprintln!("{}", summary);
    } else {
        println!("{}", summary);
    }

    Ok(())
}

/// Count newline bytes in a file, used as the progress total.
async fn count_lines(path: &str) -> std::io::Result<usize> {
    let mut file = File::open(path).await?;
    let mut buf = vec![0u8; 64 * 1024];
    let mut count = 0;

    loop {
        let n = file.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        count += buf[..n].iter().filter(|&&b| b == b'\n').count();
    }

    Ok(count)
}

fn format_summary(report: &ConversionReport) -> String {
    let mut lines = vec![
        "\nConversion completed!".to_string(),
        format!("  Duration: {:.2}s", report.duration_seconds),
        format!("  Lines read: {}", report.lines_read),
        format!("  Tables: {}", report.tables),
        format!("  Inserts: {}", report.inserts),
        format!("  Enum types: {}", report.enum_types),
        format!(
            "  Deferred: {} casts, {} foreign keys, {} sequences, {} full-text indexes",
            report.casts, report.foreign_keys, report.sequences, report.fulltext_indexes
        ),
        format!("  Skipped lines: {}", report.skipped_lines.len()),
    ];
    for skipped in &report.skipped_lines {
        lines.push(format!("    line {}: {}", skipped.line_number, skipped.line));
    }
    lines.join("\n")
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        "json" => subscriber.json().init(),
        "text" => subscriber.init(),
        other => return Err(format!("Unknown log format: {} (expected text or json)", other)),
    }

    Ok(())
}
