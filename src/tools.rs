//! External tool resolution and per-operation command builders.
//!
//! [`PgTools`] holds the paths of the five programs the workflows drive.
//! The defaults are the bare names (resolved through `PATH`); tests point
//! them at fake scripts instead.

use std::path::{Path, PathBuf};

use crate::command::CommandSpec;
use crate::config::ConnectionConfig;

/// Paths of the external programs.
#[derive(Debug, Clone)]
pub struct PgTools {
    /// Dump tool, normally `pg_dump`.
    pub pg_dump: PathBuf,
    /// Restore tool, normally `psql`.
    pub psql: PathBuf,
    /// Database-creation tool, normally `createdb`.
    pub createdb: PathBuf,
    /// Compressor, normally `gzip`.
    pub gzip: PathBuf,
    /// Streaming decompressor, normally `gunzip`.
    pub gunzip: PathBuf,
}

impl Default for PgTools {
    fn default() -> Self {
        Self {
            pg_dump: PathBuf::from("pg_dump"),
            psql: PathBuf::from("psql"),
            createdb: PathBuf::from("createdb"),
            gzip: PathBuf::from("gzip"),
            gunzip: PathBuf::from("gunzip"),
        }
    }
}

impl PgTools {
    /// `pg_dump` invocation writing the whole database to `out_file`.
    #[must_use]
    pub fn dump(&self, conn: &ConnectionConfig, out_file: &Path) -> CommandSpec {
        with_connection(CommandSpec::new(&self.pg_dump), conn)
            .arg(format!("--dbname={}", conn.database))
            .arg("--no-password")
            .path_arg("--file=", out_file)
            .env("PGPASSWORD", &conn.password)
    }

    /// `psql` invocation executing SQL from `file`.
    #[must_use]
    pub fn restore_from_file(&self, conn: &ConnectionConfig, file: &Path) -> CommandSpec {
        self.restore_from_stdin(conn).arg("-f").arg(file)
    }

    /// `psql` invocation executing SQL arriving on standard input.
    #[must_use]
    pub fn restore_from_stdin(&self, conn: &ConnectionConfig) -> CommandSpec {
        with_connection(CommandSpec::new(&self.psql), conn)
            .arg(format!("--dbname={}", conn.database))
            .env("PGPASSWORD", &conn.password)
    }

    /// `createdb` invocation for the target database.
    #[must_use]
    pub fn create_database(&self, conn: &ConnectionConfig) -> CommandSpec {
        with_connection(CommandSpec::new(&self.createdb), conn)
            .arg(&conn.database)
            .env("PGPASSWORD", &conn.password)
    }

    /// `gzip` invocation compressing `file` in place (leaves `file.gz`).
    #[must_use]
    pub fn compress(&self, file: &Path) -> CommandSpec {
        CommandSpec::new(&self.gzip).arg(file)
    }

    /// `gunzip --stdout` invocation streaming `file` to standard output.
    #[must_use]
    pub fn decompress_to_stdout(&self, file: &Path) -> CommandSpec {
        CommandSpec::new(&self.gunzip).arg("--stdout").arg(file)
    }
}

/// Shared `--host/--port/--username` prefix of every server-facing tool.
fn with_connection(spec: CommandSpec, conn: &ConnectionConfig) -> CommandSpec {
    spec.arg(format!("--host={}", conn.host))
        .arg(format!("--port={}", conn.port))
        .arg(format!("--username={}", conn.user))
}
