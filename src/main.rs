//! Chest Tally
//!
//! Turns OCR text captured from the clan gift list into per-player reward
//! counts, keeps a running tally on disk, and produces a ranked report.

mod analysis;
mod config;
mod ledger;
mod ocr;
mod paths;
mod session;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use config::AppConfig;
use session::Session;

/// Logs a message to both console and log file with timestamp.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    print!("{}", line);

    let to_file = config::try_get_config().map_or(true, |c| c.log_to_file);
    if !to_file {
        return;
    }
    let log_path = paths::get_logs_dir().join("chest_tally.log");
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        let _ = file.write_all(line.as_bytes());
    }
}

#[derive(Parser)]
#[command(
    name = "chest-tally",
    version,
    about = "Tally clan reward chests from OCR text"
)]
struct Cli {
    /// Ledger file (default: ledger_file from config.json)
    #[arg(long, value_name = "PATH", global = true)]
    ledger: Option<PathBuf>,

    /// Report JSON file (default: report_file from config.json)
    #[arg(long, value_name = "PATH", global = true)]
    report: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse OCR text, merge it into the ledger, and write the report
    Ingest(IngestArgs),
    /// Write the report for the saved ledger
    Report,
    /// Write config.json with default values next to the executable
    InitConfig,
}

#[derive(Parser)]
struct IngestArgs {
    /// OCR text dumps, one grab per file ("-" reads stdin)
    #[arg(value_name = "INPUT", default_value = ocr::input::STDIN_PATH)]
    inputs: Vec<PathBuf>,

    /// Ignore the saved ledger and start from an empty tally
    #[arg(long)]
    fresh: bool,
}

fn main() -> Result<()> {
    // Set up panic hook to log panics
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = if let Some(loc) = panic_info.location() {
            format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column())
        } else {
            String::new()
        };
        let log_msg = format!("[PANIC]{} {}\n", location, msg);
        eprintln!("{}", log_msg);
        let log_path = paths::get_logs_dir().join("chest_tally.log");
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&log_path) {
            let _ = file.write_all(log_msg.as_bytes());
        }
    }));

    let cli = Cli::parse();

    // Ensure output directories exist
    paths::ensure_directories()?;

    let config = config::init_config();
    let ledger_path = cli
        .ledger
        .clone()
        .unwrap_or_else(|| paths::resolve(&config.ledger_file));
    let report_path = cli
        .report
        .clone()
        .unwrap_or_else(|| paths::resolve(&config.report_file));

    match cli.command {
        Commands::Ingest(args) => run_ingest(&args, &ledger_path, &report_path, config.top_players),
        Commands::Report => run_report(&ledger_path, &report_path, config.top_players),
        Commands::InitConfig => {
            let config_path = paths::get_config_path();
            AppConfig::save_default(&config_path)?;
            log(&format!("Default config written: {}", config_path.display()));
            Ok(())
        }
    }
}

/// Parses each input as one grab, saves the merged ledger, and reports on it.
fn run_ingest(args: &IngestArgs, ledger_path: &Path, report_path: &Path, top: usize) -> Result<()> {
    let loaded = if args.fresh {
        log("Starting from an empty tally (--fresh)");
        Vec::new()
    } else {
        ledger::load(ledger_path, log)
    };

    let mut session = Session::new(loaded);

    for input in &args.inputs {
        let lines = ocr::read_batch(input)?;
        log(&format!(
            "Grab {}: {} lines from {}",
            session.batches() + 1,
            lines.len(),
            input.display()
        ));

        let found = session.ingest(&lines, log);
        if session.is_exhausted() {
            log(&format!("No chests in {}, stopping", input.display()));
            break;
        }
        log(&format!("Grab {}: {} chests", session.batches(), found));
    }

    let ledger = if session.parsed().is_empty() {
        log("No new chests, ledger left unchanged");
        session.snapshot()
    } else {
        let parsed = session.parsed().len();
        let ledger = session.finish(ledger_path)?;
        log(&format!(
            "Ledger saved: {} new chests, {} players, {}",
            parsed,
            ledger.players().len(),
            ledger_path.display()
        ));
        ledger
    };

    analysis::generate_report(&ledger, top, report_path)?;
    Ok(())
}

/// Reports on the saved ledger without changing it.
fn run_report(ledger_path: &Path, report_path: &Path, top: usize) -> Result<()> {
    let records = ledger::load(ledger_path, log);
    let ledger = ledger::Ledger::collect(&records);
    if ledger.is_empty() {
        log("Ledger is empty, writing an empty report");
    }
    analysis::generate_report(&ledger, top, report_path)?;
    Ok(())
}
