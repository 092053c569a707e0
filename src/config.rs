//! Configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables,
//! optionally seeded from a `credentials.env` file via `dotenvy`. Loaded
//! once at process start and passed by reference into the workflows —
//! there is no global configuration state.

use std::path::PathBuf;

use crate::error::VaultError;

/// Name of the env file holding database credentials.
pub const CREDENTIALS_FILE: &str = "credentials.env";

/// Connection parameters for the target PostgreSQL server.
///
/// Loaded via [`ConnectionConfig::from_env`]. The password is only ever
/// handed to child processes through the `PGPASSWORD` environment
/// variable, never on a command line.
#[derive(Clone)]
pub struct ConnectionConfig {
    /// Server hostname (`POSTGRES_HOST`).
    pub host: String,

    /// Server port (`POSTGRES_PORT`, default 5432).
    pub port: u16,

    /// Role to connect as (`POSTGRES_USER`).
    pub user: String,

    /// Password for the role (`POSTGRES_PASSWORD`).
    pub password: String,

    /// Database to dump or restore (`POSTGRES_DATABASE`).
    pub database: String,
}

/// Configuration for the backup workflow: connection plus the directory
/// that receives artifacts (`BACKUP_PATH`).
#[derive(Debug, Clone)]
pub struct BackupConfig {
    /// Connection parameters.
    pub conn: ConnectionConfig,

    /// Directory where backup artifacts are written. Created on demand.
    pub backup_dir: PathBuf,
}

impl ConnectionConfig {
    /// Loads connection parameters from the environment, seeding it from
    /// `credentials.env` when that file exists.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::MissingEnv`] if a required key is absent or
    /// empty, or [`VaultError::InvalidEnv`] if `POSTGRES_PORT` is set but
    /// not a valid port number.
    pub fn from_env() -> Result<Self, VaultError> {
        dotenvy::from_filename(CREDENTIALS_FILE).ok();

        Ok(Self {
            host: require("POSTGRES_HOST")?,
            port: parse_port()?,
            user: require("POSTGRES_USER")?,
            password: require("POSTGRES_PASSWORD")?,
            database: require("POSTGRES_DATABASE")?,
        })
    }
}

impl BackupConfig {
    /// Loads the backup configuration: connection parameters plus
    /// `BACKUP_PATH`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ConnectionConfig::from_env`], plus
    /// [`VaultError::MissingEnv`] when `BACKUP_PATH` is absent or empty.
    pub fn from_env() -> Result<Self, VaultError> {
        let conn = ConnectionConfig::from_env()?;
        let backup_dir = PathBuf::from(require("BACKUP_PATH")?);
        Ok(Self { conn, backup_dir })
    }
}

// Redact the password: configs get logged at startup.
impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

/// Reads a required environment variable, treating empty as absent.
fn require(key: &'static str) -> Result<String, VaultError> {
    match std::env::var(key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(VaultError::MissingEnv(key)),
    }
}

/// Reads `POSTGRES_PORT`, defaulting to 5432 when unset or empty.
fn parse_port() -> Result<u16, VaultError> {
    match std::env::var("POSTGRES_PORT") {
        Ok(value) if !value.is_empty() => {
            value.parse().map_err(|_| VaultError::InvalidEnv {
                key: "POSTGRES_PORT",
                value,
            })
        }
        _ => Ok(5432),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
// set_var/remove_var are unsafe in edition 2024; all mutation happens
// under ENV_LOCK.
#[allow(unsafe_code)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    // Environment variables are process-global; serialize the tests that
    // touch them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ALL_KEYS: [&str; 6] = [
        "POSTGRES_HOST",
        "POSTGRES_PORT",
        "POSTGRES_USER",
        "POSTGRES_PASSWORD",
        "POSTGRES_DATABASE",
        "BACKUP_PATH",
    ];

    fn set_full_env() -> MutexGuard<'static, ()> {
        let guard = match ENV_LOCK.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        for key in ALL_KEYS {
            unsafe { std::env::remove_var(key) };
        }
        unsafe {
            std::env::set_var("POSTGRES_HOST", "db.example.com");
            std::env::set_var("POSTGRES_USER", "backup_role");
            std::env::set_var("POSTGRES_PASSWORD", "s3cret");
            std::env::set_var("POSTGRES_DATABASE", "inventory");
            std::env::set_var("BACKUP_PATH", "/var/backups/pg");
        }
        guard
    }

    #[test]
    fn loads_full_backup_config() {
        let _guard = set_full_env();
        let Ok(config) = BackupConfig::from_env() else {
            panic!("config should load");
        };
        assert_eq!(config.conn.host, "db.example.com");
        assert_eq!(config.conn.port, 5432);
        assert_eq!(config.conn.database, "inventory");
        assert_eq!(config.backup_dir, PathBuf::from("/var/backups/pg"));
    }

    #[test]
    fn port_is_overridable() {
        let _guard = set_full_env();
        unsafe { std::env::set_var("POSTGRES_PORT", "6432") };
        let Ok(conn) = ConnectionConfig::from_env() else {
            panic!("config should load");
        };
        assert_eq!(conn.port, 6432);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let _guard = set_full_env();
        unsafe { std::env::set_var("POSTGRES_PORT", "not-a-port") };
        let result = ConnectionConfig::from_env();
        assert!(matches!(
            result,
            Err(VaultError::InvalidEnv {
                key: "POSTGRES_PORT",
                ..
            })
        ));
    }

    #[test]
    fn missing_user_fails_fast() {
        let _guard = set_full_env();
        unsafe { std::env::remove_var("POSTGRES_USER") };
        let result = ConnectionConfig::from_env();
        assert!(matches!(
            result,
            Err(VaultError::MissingEnv("POSTGRES_USER"))
        ));
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let _guard = set_full_env();
        unsafe { std::env::set_var("POSTGRES_PASSWORD", "") };
        let result = ConnectionConfig::from_env();
        assert!(matches!(
            result,
            Err(VaultError::MissingEnv("POSTGRES_PASSWORD"))
        ));
    }

    #[test]
    fn restore_config_does_not_need_backup_path() {
        let _guard = set_full_env();
        unsafe { std::env::remove_var("BACKUP_PATH") };
        assert!(ConnectionConfig::from_env().is_ok());
        assert!(matches!(
            BackupConfig::from_env(),
            Err(VaultError::MissingEnv("BACKUP_PATH"))
        ));
    }

    #[test]
    fn debug_redacts_password() {
        let conn = ConnectionConfig {
            host: "h".into(),
            port: 5432,
            user: "u".into(),
            password: "hunter2".into(),
            database: "d".into(),
        };
        let rendered = format!("{conn:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
