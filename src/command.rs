//! Explicit command values for external tools.
//!
//! A [`CommandSpec`] is a plain value: program path, ordered argument
//! list, and environment overrides for the child. Nothing here goes
//! through a shell, so there is no quoting or injection surface, and
//! tests can assert on specs without spawning anything.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;

/// Specification of one external tool invocation.
#[derive(Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: PathBuf,
    args: Vec<OsString>,
    env: Vec<(String, String)>,
}

impl CommandSpec {
    /// Creates a spec for `program` with no arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    /// Appends one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends one `--flag=value` argument where the value is a path.
    #[must_use]
    pub fn path_arg(mut self, flag: &str, path: &Path) -> Self {
        let mut arg = OsString::from(flag);
        arg.push(path);
        self.args.push(arg);
        self
    }

    /// Adds an environment variable for the child process only. The
    /// parent's environment is never modified.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// The program to run.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Short name of the program, for log and error messages.
    #[must_use]
    pub fn tool_name(&self) -> String {
        self.program
            .file_name()
            .unwrap_or(self.program.as_os_str())
            .to_string_lossy()
            .into_owned()
    }

    /// The ordered argument list.
    #[must_use]
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Environment overrides applied to the child.
    #[must_use]
    pub fn env_overrides(&self) -> &[(String, String)] {
        &self.env
    }

    /// Builds the `tokio::process::Command` for this spec. Stdio is left
    /// for the caller (the runner) to wire up; stdin defaults to null so
    /// a tool can never hang waiting on the terminal.
    #[must_use]
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd.stdin(Stdio::null());
        cmd
    }
}

// Env values may hold PGPASSWORD; show keys only.
impl std::fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys: Vec<&str> = self.env.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("CommandSpec")
            .field("program", &self.program)
            .field("args", &self.args)
            .field("env_keys", &keys)
            .finish()
    }
}

impl std::fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn builder_preserves_argument_order() {
        let spec = CommandSpec::new("pg_dump")
            .arg("--host=localhost")
            .arg("--no-password")
            .path_arg("--file=", Path::new("/tmp/out.sql"));
        let args: Vec<String> = spec
            .args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            ["--host=localhost", "--no-password", "--file=/tmp/out.sql"]
        );
    }

    #[test]
    fn tool_name_strips_directories() {
        let spec = CommandSpec::new("/usr/local/bin/pg_dump");
        assert_eq!(spec.tool_name(), "pg_dump");
    }

    #[test]
    fn debug_never_prints_env_values() {
        let spec = CommandSpec::new("psql").env("PGPASSWORD", "hunter2");
        let rendered = format!("{spec:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("PGPASSWORD"));
    }

    #[test]
    fn display_is_the_command_line() {
        let spec = CommandSpec::new("gzip").arg("/tmp/a.sql");
        assert_eq!(format!("{spec}"), "gzip /tmp/a.sql");
    }
}
