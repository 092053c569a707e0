//! `pgvault-restore` entry point.
//!
//! Takes exactly one positional argument: the path of the backup
//! artifact to restore. `.gz` artifacts are decompressed on the fly.
//! Exits 0 on success, 1 on any failure (including usage errors).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use pgvault::config::ConnectionConfig;
use pgvault::logging;
use pgvault::restore::run_restore;
use pgvault::runner::SystemRunner;
use pgvault::tools::PgTools;

/// Restore a PostgreSQL database from a backup file produced by
/// `pgvault-backup` (plain `.sql` or gzip-compressed `.sql.gz`).
#[derive(Debug, Parser)]
#[command(name = "pgvault-restore", version)]
struct Cli {
    /// Path of the backup file to restore.
    backup_file: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    // clap exits 2 on usage errors by default; this tool's contract is
    // exit 1 for every failure. --help/--version also arrive here as
    // errors, but with a zero exit code.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.exit_code() == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            };
        }
    };

    if let Err(e) = logging::init("restore.log") {
        eprintln!("failed to set up logging: {e}");
        return ExitCode::FAILURE;
    }

    let conn = match ConnectionConfig::from_env() {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!(error = %e, "configuration error");
            return ExitCode::FAILURE;
        }
    };

    match run_restore(&conn, &PgTools::default(), &SystemRunner, &cli.backup_file).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "restore process failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_a_usage_error() {
        let Err(e) = Cli::try_parse_from(["pgvault-restore", "--version"]) else {
            panic!("version is surfaced as a parse error");
        };
        assert_eq!(e.exit_code(), 0);
    }

    #[test]
    fn missing_backup_file_is_a_usage_error() {
        let Err(e) = Cli::try_parse_from(["pgvault-restore"]) else {
            panic!("expected a usage error");
        };
        assert_ne!(e.exit_code(), 0);
    }

    #[test]
    fn single_positional_argument_parses() {
        let Ok(cli) = Cli::try_parse_from(["pgvault-restore", "/b/appdb.sql.gz"]) else {
            panic!("one positional argument should parse");
        };
        assert_eq!(cli.backup_file, PathBuf::from("/b/appdb.sql.gz"));
    }
}
