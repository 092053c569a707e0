//! Logging: mirrored console and append-style file output.
//!
//! Each binary calls [`init`] once at startup with its own log file
//! name (`backup.log` or `restore.log`). Lines go to stderr — stdout
//! stays clean for tool output — and to `./logs/<file>`, timestamped
//! and leveled; the file sink has ANSI colors disabled. Filtering
//! follows `RUST_LOG`, defaulting to `info`.

use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::VaultError;

/// Directory that receives log files, created on demand.
pub const LOG_DIR: &str = "logs";

/// Installs the global tracing subscriber with console and file sinks.
///
/// A second call (e.g. from tests) leaves the first subscriber in place.
///
/// # Errors
///
/// Returns [`VaultError::Io`] if the log directory cannot be created.
pub fn init(log_file_name: &str) -> Result<(), VaultError> {
    std::fs::create_dir_all(Path::new(LOG_DIR))?;
    subscriber(PathBuf::from(LOG_DIR), log_file_name.to_string())
        .try_init()
        .ok();
    Ok(())
}

/// Builds the two-sink subscriber: stderr console plus appending file.
fn subscriber(
    log_dir: PathBuf,
    log_file_name: String,
) -> impl tracing::Subscriber + Send + Sync + 'static {
    let file = tracing_appender::rolling::never(log_dir, log_file_name);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(file),
        )
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn file_sink_gets_timestamped_leveled_lines() {
        let dir = match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(e) => panic!("tempdir: {e}"),
        };
        let sub = subscriber(dir.path().to_path_buf(), "unit.log".to_string());
        tracing::subscriber::with_default(sub, || {
            tracing::info!("backup completed successfully");
        });

        let content = match std::fs::read_to_string(dir.path().join("unit.log")) {
            Ok(content) => content,
            Err(e) => panic!("read log file: {e}"),
        };
        assert!(content.contains("INFO"), "log line was: {content}");
        assert!(content.contains("backup completed successfully"));
    }
}
