//! Restore workflow: feed a backup artifact into the restore tool,
//! decompressing on the fly when the artifact is gzipped.

use std::path::Path;

use tracing::{info, warn};

use crate::artifact;
use crate::config::ConnectionConfig;
use crate::error::VaultError;
use crate::runner::ToolRunner;
use crate::tools::PgTools;

/// Restores `artifact` into the configured database.
///
/// The artifact must exist on disk; that is checked before any
/// subprocess is launched. Database creation is best-effort: any
/// `createdb` failure (typically "already exists") is logged as a
/// warning and the restore proceeds. A `.gz` artifact is streamed
/// through the decompressor straight into the restore tool's stdin —
/// no intermediate file, no whole-artifact buffering; a plain `.sql`
/// artifact is passed to the restore tool as a file argument.
///
/// There is no rollback: a restore that fails mid-stream leaves the
/// database in whatever state the restore tool left it.
///
/// # Errors
///
/// Returns [`VaultError::ArtifactNotFound`] for a missing artifact, or
/// the restore pipeline's [`VaultError::Tool`] / [`VaultError::Io`].
pub async fn run_restore<R: ToolRunner>(
    conn: &ConnectionConfig,
    tools: &PgTools,
    runner: &R,
    artifact: &Path,
) -> Result<(), VaultError> {
    if !artifact.exists() {
        return Err(VaultError::ArtifactNotFound(artifact.to_path_buf()));
    }

    info!(database = %conn.database, "starting restore");

    match runner.run(&tools.create_database(conn)).await {
        Ok(()) => info!(database = %conn.database, "created fresh database"),
        Err(e) => {
            warn!(
                database = %conn.database,
                error = %e,
                "could not create database, proceeding with restore"
            );
        }
    }

    let result = if artifact::is_compressed(artifact) {
        info!("detected compressed backup file, decompressing and restoring");
        runner
            .run_piped(
                &tools.decompress_to_stdout(artifact),
                &tools.restore_from_stdin(conn),
            )
            .await
    } else {
        info!("detected uncompressed backup file, restoring");
        runner.run(&tools.restore_from_file(conn, artifact)).await
    };

    match result {
        Ok(()) => {
            info!("restore completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "restore failed");
            Err(e)
        }
    }
}
