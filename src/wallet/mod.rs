//! rusk-wallet CLI integration.
//!
//! Builds the two wallet commands the monitor needs (profile listing and
//! per-address spendable balance) and runs them through a
//! [`CommandExecutor`]. Failures never escape [`WalletCli::run`]: they are
//! logged and reported as "no output".

pub mod executor;

use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

pub use executor::{CommandExecutor, ProcessExecutor};

use crate::config::WalletMonitorConfig;

const ELEVATION_PROGRAM: &str = "sudo";
const REDACTED: &str = "***";

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Which wallet subcommand to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    /// `profiles`: lists public and shielded addresses.
    Profiles,
    /// `balance --spendable --address <addr>`.
    Balance { address: String },
}

impl CommandKind {
    fn subcommand(&self) -> Vec<String> {
        match self {
            CommandKind::Profiles => vec!["profiles".to_string()],
            CommandKind::Balance { address } => vec![
                "balance".to_string(),
                "--spendable".to_string(),
                "--address".to_string(),
                address.clone(),
            ],
        }
    }
}

/// A fully-specified wallet invocation.
///
/// The password travels as a secret and is only exposed when building
/// the real argument vector; `Display` redacts it.
#[derive(Debug, Clone)]
pub struct WalletCommand {
    pub kind: CommandKind,
    binary: String,
    elevate: bool,
    password: Arc<SecretString>,
}

impl WalletCommand {
    pub fn new(
        kind: CommandKind,
        binary: impl Into<String>,
        elevate: bool,
        password: Arc<SecretString>,
    ) -> Self {
        Self {
            kind,
            binary: binary.into(),
            elevate,
            password,
        }
    }

    /// Program to spawn.
    pub fn program(&self) -> &str {
        if self.elevate {
            ELEVATION_PROGRAM
        } else {
            &self.binary
        }
    }

    /// Arguments passed to [`program`](Self::program), password included.
    pub fn argv(&self) -> Vec<String> {
        self.args_with(self.password.expose_secret())
    }

    fn args_with(&self, password: &str) -> Vec<String> {
        let mut args = Vec::new();
        if self.elevate {
            args.push(self.binary.clone());
        }
        args.push("--password".to_string());
        args.push(password.to_string());
        args.extend(self.kind.subcommand());
        args
    }
}

impl fmt::Display for WalletCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program())?;
        for arg in self.args_with(REDACTED) {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Wallet client
// ---------------------------------------------------------------------------

/// Handle for issuing wallet commands.
///
/// Cheap to clone; concurrent fetches share one executor.
#[derive(Clone)]
pub struct WalletCli {
    executor: Arc<dyn CommandExecutor>,
    binary: String,
    use_sudo: bool,
    password: Arc<SecretString>,
}

impl WalletCli {
    pub fn new(
        executor: Arc<dyn CommandExecutor>,
        binary: impl Into<String>,
        use_sudo: bool,
        password: SecretString,
    ) -> Self {
        Self {
            executor,
            binary: binary.into(),
            use_sudo,
            password: Arc::new(password),
        }
    }

    pub fn from_config(
        cfg: &WalletMonitorConfig,
        executor: Arc<dyn CommandExecutor>,
        password: SecretString,
    ) -> Self {
        Self::new(executor, cfg.wallet_binary.clone(), cfg.use_sudo, password)
    }

    pub fn command(&self, kind: CommandKind) -> WalletCommand {
        WalletCommand::new(kind, self.binary.clone(), self.use_sudo, self.password.clone())
    }

    pub fn profiles_command(&self) -> WalletCommand {
        self.command(CommandKind::Profiles)
    }

    pub fn balance_command(&self, address: &str) -> WalletCommand {
        self.command(CommandKind::Balance {
            address: address.to_string(),
        })
    }

    /// Run a command once. Any failure, or empty output, is `None`.
    pub async fn run(&self, command: &WalletCommand) -> Option<String> {
        match self.executor.execute(command).await {
            Ok(output) if output.is_empty() => {
                debug!(command = %command, "Wallet command produced no output");
                None
            }
            Ok(output) => Some(output),
            Err(e) => {
                warn!(command = %command, error = %e, "Wallet command failed");
                None
            }
        }
    }
}

impl fmt::Debug for WalletCli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletCli")
            .field("binary", &self.binary)
            .field("use_sudo", &self.use_sudo)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
