//! rusk-monitor: recurring balance-change monitor for rusk-wallet.
//!
//! Entry point. Loads configuration, initialises structured logging,
//! resolves the wallet password (fatal if missing), and runs the
//! poll → aggregate → detect → notify loop until Ctrl+C.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use rusk_monitor::config::{self, AppConfig};
use rusk_monitor::engine::{Monitor, MonitorSettings};
use rusk_monitor::notify::{build_notifier, Notifier};
use rusk_monitor::wallet::{ProcessExecutor, WalletCli};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let cfg = AppConfig::load(&config_path)?;

    init_logging();

    info!(
        config = %config_path,
        wallet_binary = %cfg.wallet_monitor.wallet_binary,
        use_sudo = cfg.wallet_monitor.use_sudo,
        check_interval_secs = cfg.wallet_monitor.check_interval,
        monitor_balance = cfg.wallet_monitor.monitor_balance,
        "rusk-monitor starting up"
    );

    // The loop must never start without a password.
    let password = config::resolve_password(&cfg.pwd_var_name)
        .context("Wallet password variable error")?;

    let wallet = WalletCli::from_config(
        &cfg.wallet_monitor,
        Arc::new(ProcessExecutor::new()),
        password,
    );
    let notifier: Arc<dyn Notifier> = Arc::new(build_notifier(&cfg.notifications));
    let monitor = Monitor::new(
        wallet,
        notifier,
        MonitorSettings::from(&cfg.wallet_monitor),
    );

    info!("Entering main loop. Press Ctrl+C to stop.");

    let final_state = monitor
        .run(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await;

    info!(
        public = final_state.previous.public,
        shielded = final_state.previous.shielded,
        "Monitoring stopped."
    );

    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("rusk_monitor=info"));

    let json_logging = std::env::var("RUSK_MONITOR_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
