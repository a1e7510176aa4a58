//! Poll scheduler. Drives aggregate → detect → notify at a fixed interval.
//!
//! The retained [`MonitorState`] is a plain value threaded through each
//! cycle. A cycle that fails or is interrupted returns nothing, so the
//! last committed state stays in force.

use chrono::{DateTime, Utc};
use futures::FutureExt;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use super::aggregator::aggregate;
use super::detector::detect;
use crate::config::WalletMonitorConfig;
use crate::notify::Notifier;
use crate::types::{AggregateTotals, MonitorError, MonitorState, Notification};
use crate::wallet::WalletCli;

// ---------------------------------------------------------------------------
// Settings & report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorSettings {
    /// Gate for balance-change notifications.
    pub monitor_balance: bool,
    /// Pause between the end of one cycle and the start of the next.
    pub check_interval: Duration,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            monitor_balance: true,
            check_interval: Duration::from_secs(60),
        }
    }
}

impl From<&WalletMonitorConfig> for MonitorSettings {
    fn from(cfg: &WalletMonitorConfig) -> Self {
        Self {
            monitor_balance: cfg.monitor_balance,
            check_interval: cfg.check_interval(),
        }
    }
}

/// Summary of one completed cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub cycle_number: u64,
    pub timestamp: DateTime<Utc>,
    pub totals: AggregateTotals,
    pub public_addresses: usize,
    pub shielded_addresses: usize,
    pub unavailable: usize,
    pub notifications: usize,
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cycle #{}: {} ({} public / {} shielded addresses, {} unavailable, {} notifications)",
            self.cycle_number,
            self.totals,
            self.public_addresses,
            self.shielded_addresses,
            self.unavailable,
            self.notifications,
        )
    }
}

// ---------------------------------------------------------------------------
// Monitor
// ---------------------------------------------------------------------------

pub struct Monitor {
    wallet: WalletCli,
    notifier: Arc<dyn Notifier>,
    settings: MonitorSettings,
}

impl Monitor {
    pub fn new(wallet: WalletCli, notifier: Arc<dyn Notifier>, settings: MonitorSettings) -> Self {
        Self {
            wallet,
            notifier,
            settings,
        }
    }

    /// Run one cycle against `state` and return the state for the next one.
    pub async fn run_cycle(
        &self,
        state: MonitorState,
        cycle_number: u64,
    ) -> Result<(MonitorState, CycleReport), MonitorError> {
        info!(cycle = cycle_number, "Starting cycle");

        let snapshot = aggregate(&self.wallet).await?;
        let detection = detect(state, snapshot.totals, self.settings.monitor_balance);

        for notification in &detection.notifications {
            let message = notification.to_string();
            info!(message = %message, "Dispatching notification");
            self.notifier.notify(&message).await;
        }

        let report = CycleReport {
            cycle_number,
            timestamp: Utc::now(),
            totals: snapshot.totals,
            public_addresses: snapshot.public_addresses,
            shielded_addresses: snapshot.shielded_addresses,
            unavailable: snapshot.unavailable,
            notifications: detection.notifications.len(),
        };

        Ok((detection.state, report))
    }

    /// Deliver the startup notice. Independent of the wallet, so it goes
    /// out even when the first listing fails.
    async fn announce(&self) {
        let message = Notification::Startup.to_string();
        info!(message = %message, "Dispatching notification");
        self.notifier.notify(&message).await;
    }

    /// Poll from a fresh state until `shutdown` resolves.
    pub async fn run<F>(&self, shutdown: F) -> MonitorState
    where
        F: Future<Output = ()>,
    {
        self.run_from(MonitorState::new(), shutdown).await
    }

    /// Poll from `state` until `shutdown` resolves; returns the last
    /// committed state.
    pub async fn run_from<F>(&self, mut state: MonitorState, shutdown: F) -> MonitorState
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut cycle: u64 = 0;

        info!(
            interval_secs = self.settings.check_interval.as_secs(),
            monitor_balance = self.settings.monitor_balance,
            "Entering poll loop"
        );

        if !state.announced {
            self.announce().await;
            state.announced = true;
        }

        loop {
            cycle += 1;
            let attempt = AssertUnwindSafe(self.run_cycle(state, cycle)).catch_unwind();

            tokio::select! {
                outcome = attempt => match outcome {
                    Ok(Ok((next, report))) => {
                        log_cycle_report(&report);
                        state = next;
                    }
                    Ok(Err(e)) => {
                        error!(cycle, error = %e, "Cycle failed, keeping previous state");
                    }
                    Err(_) => {
                        error!(cycle, "Cycle panicked, keeping previous state");
                    }
                },
                _ = &mut shutdown => {
                    info!(cycle, "Shutdown signal received mid-cycle, discarding it");
                    break;
                }
            }

            tokio::select! {
                _ = tokio::time::sleep(self.settings.check_interval) => {}
                _ = &mut shutdown => {
                    info!("Shutdown signal received.");
                    break;
                }
            }
        }

        state
    }
}

/// Log a human-readable cycle summary.
fn log_cycle_report(report: &CycleReport) {
    info!(
        cycle = report.cycle_number,
        public = report.totals.public,
        shielded = report.totals.shielded,
        unavailable = report.unavailable,
        notifications = report.notifications,
        at = %report.timestamp.to_rfc3339(),
        "Cycle complete"
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
