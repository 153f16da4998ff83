//! ftp-mirror - Main entry point
//!
//! One-way FTP pull mirror: fetches configured remote files when they are
//! newer than the local copies, preserving each replaced local file as a
//! timestamped backup first.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use ftp_mirror::sync::engine::{self, RunStatus};
use ftp_mirror::transport::ftp::FtpTransport;
use ftp_mirror::{utils, Config};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Load environment variables from this file instead of ./.env
    #[arg(long, value_name = "FILE")]
    env_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = utils::logger::init(&args.log_level) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::from(2);
    }

    match run(&args) {
        Ok(RunStatus::Success) => ExitCode::SUCCESS,
        Ok(RunStatus::CompletedWithErrors) => ExitCode::from(1),
        Ok(RunStatus::Fatal) => ExitCode::from(2),
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> anyhow::Result<RunStatus> {
    // Load configuration
    match &args.env_file {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("cannot load env file {}", path.display()))?;
        }
        None => {
            // A missing default .env is fine; the environment itself may
            // carry everything.
            let _ = dotenvy::dotenv();
        }
    }

    let config = Config::from_env()?;

    info!(
        "Starting ftp-mirror v{} ({} pairs, host {})",
        env!("CARGO_PKG_VERSION"),
        config.sync.pairs.len(),
        config.ftp.host
    );

    // Open the session and mirror every configured pair over it
    let mut transport = FtpTransport::connect(&config.ftp)?;
    let report = engine::run(&mut transport, &config.sync);

    let counts = report.counts();
    info!(
        "Run complete: {} fetched, {} backed up and fetched, {} up to date, {} missing on remote, {} failed",
        counts.fetched,
        counts.backed_up_and_fetched,
        counts.up_to_date,
        counts.remote_missing,
        counts.failed
    );

    if let Some(fatal) = &report.fatal {
        error!("Run aborted: {fatal}");
    }

    Ok(report.status())
}
