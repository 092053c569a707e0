//! `pgvault-backup` entry point.
//!
//! Takes no arguments. Loads the backup configuration from the
//! environment (optionally `credentials.env`), dumps the database into
//! a timestamped artifact under `BACKUP_PATH` and compresses it.
//! Exits 0 on success, 1 on any failure.

use std::process::ExitCode;

use clap::Parser;

use pgvault::backup::run_backup;
use pgvault::config::BackupConfig;
use pgvault::logging;
use pgvault::runner::SystemRunner;
use pgvault::tools::PgTools;

/// Back up the configured PostgreSQL database to a timestamped,
/// gzip-compressed SQL file.
#[derive(Debug, Parser)]
#[command(name = "pgvault-backup", version)]
struct Cli {}

#[tokio::main]
async fn main() -> ExitCode {
    // clap exits 2 on usage errors by default; this tool's contract is
    // exit 1 for every failure. --help/--version also arrive here as
    // errors, but with a zero exit code.
    if let Err(e) = Cli::try_parse() {
        let _ = e.print();
        return if e.exit_code() == 0 {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    if let Err(e) = logging::init("backup.log") {
        eprintln!("failed to set up logging: {e}");
        return ExitCode::FAILURE;
    }

    let config = match BackupConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "configuration error");
            return ExitCode::FAILURE;
        }
    };

    match run_backup(&config, &PgTools::default(), &SystemRunner).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "backup process failed");
            ExitCode::FAILURE
        }
    }
}
