//! Configuration loading from TOML with environment variable resolution.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! The wallet password is referenced by env-var name in the config and
//! resolved at startup; a missing password stops the process before the
//! poll loop starts.

use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;
use std::fs;
use std::time::Duration;

use crate::types::MonitorError;

/// Variable consulted when the configured one is unset.
pub const FALLBACK_PASSWORD_VAR: &str = "WALLET_PASSWORD";

const DEFAULT_CHECK_INTERVAL_SECS: u64 = 60;
const DEFAULT_WALLET_BINARY: &str = "rusk-wallet";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Name of the env var holding the wallet password.
    #[serde(default = "default_pwd_var_name")]
    pub pwd_var_name: String,
    #[serde(default)]
    pub wallet_monitor: WalletMonitorConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WalletMonitorConfig {
    /// Prefix wallet commands with `sudo`.
    #[serde(default)]
    pub use_sudo: bool,
    /// Gate for balance-change notifications.
    #[serde(default = "default_true")]
    pub monitor_balance: bool,
    /// Poll period in seconds.
    #[serde(default = "default_check_interval")]
    pub check_interval: u64,
    #[serde(default = "default_wallet_binary")]
    pub wallet_binary: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotificationsConfig {
    /// Mirror every notification into the log stream.
    #[serde(default = "default_true")]
    pub console: bool,
    pub telegram_bot_token_env: Option<String>,
    pub telegram_chat_id_env: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pwd_var_name: default_pwd_var_name(),
            wallet_monitor: WalletMonitorConfig::default(),
            notifications: NotificationsConfig::default(),
        }
    }
}

impl Default for WalletMonitorConfig {
    fn default() -> Self {
        Self {
            use_sudo: false,
            monitor_balance: true,
            check_interval: DEFAULT_CHECK_INTERVAL_SECS,
            wallet_binary: default_wallet_binary(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            console: true,
            telegram_bot_token_env: None,
            telegram_chat_id_env: None,
        }
    }
}

fn default_pwd_var_name() -> String {
    FALLBACK_PASSWORD_VAR.to_string()
}

fn default_true() -> bool {
    true
}

fn default_check_interval() -> u64 {
    DEFAULT_CHECK_INTERVAL_SECS
}

fn default_wallet_binary() -> String {
    DEFAULT_WALLET_BINARY.to_string()
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::from_toml(&contents).with_context(|| format!("Invalid config file: {path}"))
    }

    /// Parse and validate configuration text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig =
            toml::from_str(contents).context("Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), MonitorError> {
        if self.wallet_monitor.wallet_binary.trim().is_empty() {
            return Err(MonitorError::Config(
                "wallet_monitor.wallet_binary must not be empty".into(),
            ));
        }
        if self.pwd_var_name.trim().is_empty() {
            return Err(MonitorError::Config("pwd_var_name must not be empty".into()));
        }
        Ok(())
    }
}

impl WalletMonitorConfig {
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval)
    }
}

/// Resolve the wallet password: `primary`, then [`FALLBACK_PASSWORD_VAR`].
pub fn resolve_password(primary: &str) -> Result<SecretString, MonitorError> {
    resolve_password_from(primary, FALLBACK_PASSWORD_VAR)
}

/// Resolve a secret from the first non-empty of two env vars.
pub fn resolve_password_from(primary: &str, fallback: &str) -> Result<SecretString, MonitorError> {
    [primary, fallback]
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.is_empty())
        .map(SecretString::new)
        .ok_or_else(|| MonitorError::MissingCredential {
            primary: primary.to_string(),
            fallback: fallback.to_string(),
        })
}
