//! Command execution boundary.
//!
//! `CommandExecutor` is the seam between the engine and the wallet
//! binary. `ProcessExecutor` spawns real child processes; tests swap in
//! mocks or stubs that never touch the OS.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use super::WalletCommand;
use crate::types::MonitorError;

/// Runs one wallet command to completion.
///
/// Returns trimmed stdout on exit status 0. Every call is a single
/// attempt; retry policy belongs to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, command: &WalletCommand) -> Result<String, MonitorError>;
}

/// Production executor backed by `tokio::process`.
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandExecutor for ProcessExecutor {
    async fn execute(&self, command: &WalletCommand) -> Result<String, MonitorError> {
        debug!(command = %command, "Spawning wallet command");

        // The child is killed if the cycle future is dropped mid-flight.
        let output = Command::new(command.program())
            .args(command.argv())
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| MonitorError::Spawn {
                command: command.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(MonitorError::CommandFailed {
                command: command.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
