use std::io::stderr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use ledger_sheets::engine::{transaction_description, LedgerEngine};
use ledger_sheets::storage::{load_workbook, save_workbook, MemoryWorkbook};

#[derive(Debug, Parser)]
#[command(name = "ledger-sheets", version, about = "Imports bank transactions into a ledger sheet and summarises them by month")]
struct Args {
    /// Directory holding one <sheet>.csv file per sheet
    #[arg(long, default_value = ".")]
    workbook: PathBuf,
    /// Available log levels: error, warn, info, debug, trace
    #[arg(long, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Command
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Copy the new rows of the import sheet to the top of the raw ledger
    Import,
    /// Bring the monthly summary in the display sheet up to date
    Display,
    /// Evaluate the TRANSACTION_DESCRIPTION cell function
    Describe {
        description: String
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(parse_log_level(&args.log_level));

    let message = match &args.command {
        Command::Import => with_workbook(&args.workbook, |engine| {
            let summary = engine.import_data()?;
            Ok(match summary.newest {
                Some(newest) => format!("imported {} transactions, newest {newest}", summary.imported),
                None => "imported 0 transactions".to_string()
            })
        })?,
        Command::Display => with_workbook(&args.workbook, |engine| {
            let summary = engine.display_data()?;
            Ok(format!("summarised {} transactions in {} months", summary.transactions, summary.months))
        })?,
        Command::Describe { description } => transaction_description(description).to_string()
    };

    println!("{message}");

    Ok(())
}

fn with_workbook<F>(directory: &Path, command: F) -> Result<String>
where
    F: FnOnce(&LedgerEngine<MemoryWorkbook>) -> Result<String>,
{
    let workbook = Arc::new(load_workbook(directory)?);
    let engine = LedgerEngine::new(workbook.clone());

    let timer = Instant::now();
    let outcome = command(&engine);
    let duration = timer.elapsed();

    info!("Processed workbook {directory:?} in: {duration:?}");

    //NOTE: Sheets are written back even when the command failed, partial edits are not rolled back.
    save_workbook(&workbook, directory)?;

    outcome
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the command result, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}
