//! Tool execution: the seam between workflows and real processes.
//!
//! Workflows depend on the [`ToolRunner`] trait, never on
//! `tokio::process` directly. [`SystemRunner`] is the production
//! implementation; tests substitute recording mocks to assert which
//! tools would run, in what order, without spawning anything.

use std::process::Stdio;

use tokio::io::AsyncReadExt;

use crate::command::CommandSpec;
use crate::error::VaultError;

/// Executes external tool invocations described by [`CommandSpec`]s.
#[allow(async_fn_in_trait)]
pub trait ToolRunner {
    /// Runs one tool to completion.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Tool`] on a non-zero exit (with captured
    /// stderr) or [`VaultError::Io`] if the tool cannot be spawned.
    async fn run(&self, spec: &CommandSpec) -> Result<(), VaultError>;

    /// Runs two tools connected by a byte-stream pipe: `producer`'s
    /// standard output feeds `consumer`'s standard input. The stream is
    /// forwarded chunk by chunk, so the payload is never buffered in
    /// memory, and the consumer's stdin is closed as soon as the
    /// producer's output ends.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Tool`] when either child exits non-zero,
    /// or [`VaultError::Io`] on spawn or stream failure. A failing
    /// consumer is reported over a failing producer: a consumer that
    /// quits early kills the producer with SIGPIPE, and the consumer's
    /// diagnostic is the one worth surfacing.
    async fn run_piped(
        &self,
        producer: &CommandSpec,
        consumer: &CommandSpec,
    ) -> Result<(), VaultError>;
}

/// Production runner backed by `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<(), VaultError> {
        let mut cmd = spec.to_command();
        // Child stdout is discarded (psql echoes every statement);
        // stderr is captured for the error message and the log file.
        cmd.stdout(Stdio::null()).stderr(Stdio::piped());

        let child = cmd.spawn()?;
        let output = child.wait_with_output().await?;
        if output.status.success() {
            return Ok(());
        }
        Err(VaultError::Tool {
            tool: spec.tool_name(),
            status: output.status.to_string(),
            stderr: lossy_trimmed(&output.stderr),
        })
    }

    async fn run_piped(
        &self,
        producer: &CommandSpec,
        consumer: &CommandSpec,
    ) -> Result<(), VaultError> {
        let mut prod_cmd = producer.to_command();
        prod_cmd
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        let mut prod = prod_cmd.spawn()?;

        let mut cons_cmd = consumer.to_command();
        cons_cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        let mut cons = match cons_cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                let _ = prod.start_kill();
                return Err(e.into());
            }
        };

        let mut prod_out = take_stream(prod.stdout.take())?;
        let cons_in = take_stream(cons.stdin.take())?;
        let prod_err = take_stream(prod.stderr.take())?;
        let cons_err = take_stream(cons.stderr.take())?;

        // Drain both stderr pipes while forwarding the payload, so a
        // chatty child cannot fill its stderr buffer and deadlock.
        let (copy_result, prod_stderr, cons_stderr) = tokio::join!(
            async move {
                let mut cons_in = cons_in;
                let result = tokio::io::copy(&mut prod_out, &mut cons_in).await;
                // Dropping the handle closes the pipe: the consumer
                // sees EOF and can finish.
                drop(cons_in);
                result
            },
            read_all(prod_err),
            read_all(cons_err),
        );

        let prod_status = prod.wait().await?;
        let cons_status = cons.wait().await?;

        // Consumer first: when it exits non-zero mid-stream the
        // producer dies of SIGPIPE with nothing useful on stderr.
        if !cons_status.success() {
            return Err(VaultError::Tool {
                tool: consumer.tool_name(),
                status: cons_status.to_string(),
                stderr: cons_stderr,
            });
        }
        if !prod_status.success() {
            return Err(VaultError::Tool {
                tool: producer.tool_name(),
                status: prod_status.to_string(),
                stderr: prod_stderr,
            });
        }
        copy_result?;
        Ok(())
    }
}

/// Unwraps a piped child stream handle.
fn take_stream<T>(stream: Option<T>) -> Result<T, VaultError> {
    stream.ok_or_else(|| VaultError::Io(std::io::Error::other("child stream was not piped")))
}

/// Reads a stderr pipe to the end, tolerating read errors.
async fn read_all(mut stream: impl AsyncReadExt + Unpin) -> String {
    let mut buf = Vec::new();
    let _ = stream.read_to_end(&mut buf).await;
    lossy_trimmed(&buf)
}

fn lossy_trimmed(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim().to_string()
}
