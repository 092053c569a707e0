//! Backup artifact naming.
//!
//! An artifact is a file `<database>_backup_<YYYYMMDDHHMMSS>.sql`,
//! optionally suffixed `.gz` once `gzip` has run over it. There is no
//! artifact registry — discovery of existing backups is left to the
//! filesystem.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

/// Timestamp format embedded in artifact file names (second granularity).
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Computes the path of a new (uncompressed) artifact for `database`
/// inside `backup_dir`, stamped with `at`.
#[must_use]
pub fn artifact_path(backup_dir: &Path, database: &str, at: DateTime<Local>) -> PathBuf {
    let stamp = at.format(TIMESTAMP_FORMAT);
    backup_dir.join(format!("{database}_backup_{stamp}.sql"))
}

/// Returns the path `gzip` leaves behind for `path` (same name plus `.gz`).
#[must_use]
pub fn compressed_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".gz");
    PathBuf::from(name)
}

/// Whether `path` names a gzip-compressed artifact, judged by the file
/// name suffix alone (the restore workflow never sniffs file contents).
#[must_use]
pub fn is_compressed(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}
