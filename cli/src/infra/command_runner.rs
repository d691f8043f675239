//! `CommandRunner` backed by `tokio::process`.
//!
//! Only used for launcher `--version` probes, so stdin is closed and both
//! output streams are captured in full.

use std::process::{Output, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::CommandRunner;

/// Default timeout for launcher `--version` probes.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TokioCommandRunner {
    timeout: Duration,
}

impl TokioCommandRunner {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TokioCommandRunner {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }
}

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.run_with_timeout(program, args, self.timeout).await
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output> {
        // The child is owned by the `wait_with_output` future; when the
        // timeout drops that future, `kill_on_drop` kills the process.
        let child = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;

        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(output) => output.with_context(|| format!("waiting for {program}")),
            Err(_) => {
                tracing::debug!(%program, ?timeout, "probe timed out; child killed");
                anyhow::bail!("{program} timed out after {}ms", timeout.as_millis())
            }
        }
    }
}
