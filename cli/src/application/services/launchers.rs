//! Application service: launcher availability probes.
//!
//! Runs `<launcher> --version` for every distinct known launcher in the
//! registry. Commands outside the launcher tables are never executed. Results
//! are informational and never change entry verdicts.

use mcpdoc_common::LauncherStatus;

use crate::application::ports::CommandRunner;
use crate::domain::registry::Registry;

/// Distinct known launcher commands, in first-seen registry order.
#[must_use]
pub fn launcher_commands(registry: &Registry) -> Vec<String> {
    let mut commands: Vec<String> = Vec::new();
    let known = registry.entries().iter().filter(|e| e.kind().is_some());
    for command in known.filter_map(|e| e.command()) {
        if !commands.iter().any(|c| c == command) {
            commands.push(command.to_string());
        }
    }
    commands
}

/// Probe each launcher used by the registry.
pub async fn probe_launchers(runner: &impl CommandRunner, registry: &Registry) -> Vec<LauncherStatus> {
    let mut statuses = Vec::new();
    for command in launcher_commands(registry) {
        statuses.push(probe_launcher(runner, &command).await);
    }
    statuses
}

async fn probe_launcher(runner: &impl CommandRunner, command: &str) -> LauncherStatus {
    let output = match runner.run(command, &["--version"]).await {
        Ok(output) if output.status.success() => output,
        Ok(output) => {
            tracing::debug!(%command, status = %output.status, "launcher exited with failure");
            return not_found(command);
        }
        Err(e) => {
            tracing::debug!(%command, error = %e, "launcher not runnable");
            return not_found(command);
        }
    };
    // Some interpreters print their version on stderr.
    let version = first_line(&output.stdout).or_else(|| first_line(&output.stderr));
    LauncherStatus {
        command: command.to_string(),
        found: true,
        version,
    }
}

fn not_found(command: &str) -> LauncherStatus {
    LauncherStatus {
        command: command.to_string(),
        found: false,
        version: None,
    }
}

fn first_line(bytes: &[u8]) -> Option<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_owned)
}
