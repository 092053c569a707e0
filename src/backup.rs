//! Backup workflow: dump the database to a timestamped artifact, then
//! compress it best-effort.

use std::path::PathBuf;

use chrono::Local;
use tracing::{info, warn};

use crate::artifact;
use crate::config::BackupConfig;
use crate::error::VaultError;
use crate::runner::ToolRunner;
use crate::tools::PgTools;

/// Runs one backup: ensures the backup directory exists, invokes the
/// dump tool into `<database>_backup_<timestamp>.sql`, then attempts to
/// gzip the result. Returns the path of the finished artifact —
/// compressed when compression succeeded, plain otherwise.
///
/// A dump failure is fatal and any partial output file is left in place
/// for inspection. A compression failure is not fatal: the uncompressed
/// artifact is a valid backup.
///
/// # Errors
///
/// Returns [`VaultError::Io`] if the backup directory cannot be
/// created, or the dump tool's [`VaultError::Tool`] / spawn error.
pub async fn run_backup<R: ToolRunner>(
    config: &BackupConfig,
    tools: &PgTools,
    runner: &R,
) -> Result<PathBuf, VaultError> {
    std::fs::create_dir_all(&config.backup_dir)?;

    let out_file = artifact::artifact_path(&config.backup_dir, &config.conn.database, Local::now());

    info!(database = %config.conn.database, "starting backup");

    if let Err(e) = runner.run(&tools.dump(&config.conn, &out_file)).await {
        tracing::error!(error = %e, "backup failed");
        return Err(e);
    }
    info!(file = %out_file.display(), "backup completed successfully");

    info!("compressing backup file");
    match runner.run(&tools.compress(&out_file)).await {
        Ok(()) => {
            let compressed = artifact::compressed_path(&out_file);
            info!(file = %compressed.display(), "backup compressed successfully");
            Ok(compressed)
        }
        Err(e) => {
            warn!(error = %e, "compression failed, but backup file is still intact");
            Ok(out_file)
        }
    }
}
