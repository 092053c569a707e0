//! # pgvault
//!
//! Backup and restore for a PostgreSQL database by driving the standard
//! external tools: `pg_dump` writes a timestamped SQL artifact, `gzip`
//! compresses it, `gunzip` and `psql` restore it (streamed, no temp
//! file), `createdb` prepares the target database best-effort.
//!
//! ## Architecture
//!
//! ```text
//! pgvault-backup / pgvault-restore  (src/bin/)
//!     │
//!     ├── backup / restore workflows     (backup.rs, restore.rs)
//!     │
//!     ├── PgTools → CommandSpec          (tools.rs, command.rs)
//!     ├── ToolRunner / SystemRunner      (runner.rs)
//!     │
//!     ├── ConnectionConfig / BackupConfig  (config.rs)
//!     └── tracing file+console sink        (logging.rs)
//! ```
//!
//! The workflows never spawn processes themselves: they build
//! [`command::CommandSpec`] values and hand them to a
//! [`runner::ToolRunner`], which is the seam tests mock.

pub mod artifact;
pub mod backup;
pub mod command;
pub mod config;
pub mod error;
pub mod logging;
pub mod restore;
pub mod runner;
pub mod tools;
