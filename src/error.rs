//! Crate-wide error type.
//!
//! [`VaultError`] covers every fatal condition in the tool: missing or
//! invalid configuration, a missing restore artifact, a non-zero exit
//! from an external tool, and plain I/O failures (spawn, pipe, mkdir).
//!
//! The two recoverable conditions — compression failure during backup
//! and `createdb` failure during restore — are deliberately *not*
//! variants: the workflows recover from them in place and surface them
//! only as `tracing::warn` lines.

use std::path::PathBuf;

/// Fatal error for a backup or restore invocation.
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    /// Required configuration key absent or empty in the environment
    /// and `credentials.env`.
    #[error("{0} is not set (checked environment and credentials.env)")]
    MissingEnv(&'static str),

    /// Configuration key present but unparseable.
    #[error("invalid value for {key}: {value:?}")]
    InvalidEnv {
        /// The offending configuration key.
        key: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },

    /// Restore artifact does not exist on disk. Raised before any
    /// subprocess is launched.
    #[error("backup file not found: {0}")]
    ArtifactNotFound(PathBuf),

    /// An external tool exited with a non-zero status.
    #[error("{tool} failed with {status}: {stderr}")]
    Tool {
        /// Program name, e.g. `pg_dump`.
        tool: String,
        /// Exit code, or a description when killed by a signal.
        status: String,
        /// Trimmed stderr captured from the child.
        stderr: String,
    },

    /// Filesystem or pipe failure (spawning a tool, creating the backup
    /// directory, streaming between children).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
