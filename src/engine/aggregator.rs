//! Balance aggregator.
//!
//! Discovers addresses once, fetches every balance concurrently, waits for
//! the whole set and only then sums per class. A failed fetch counts as
//! zero; a failed discovery fails the cycle.

use futures::future::join_all;
use tracing::{info, warn};

use super::discovery::discover;
use super::fetcher::fetch_balance;
use crate::types::{AggregateTotals, BalanceReading, CycleSnapshot, MonitorError};
use crate::wallet::WalletCli;

/// Run discovery and all balance fetches for one cycle.
pub async fn aggregate(wallet: &WalletCli) -> Result<CycleSnapshot, MonitorError> {
    let addresses = discover(wallet).await?;

    // Build every future before awaiting any of them.
    let public = join_all(addresses.public.iter().map(|a| fetch_balance(wallet, a)));
    let shielded = join_all(addresses.shielded.iter().map(|a| fetch_balance(wallet, a)));
    let (public, shielded) = tokio::join!(public, shielded);

    let unavailable = public
        .iter()
        .chain(shielded.iter())
        .filter(|r| !r.is_available())
        .count();

    let snapshot = CycleSnapshot {
        totals: AggregateTotals::new(sum_readings(&public), sum_readings(&shielded)),
        public_addresses: public.len(),
        shielded_addresses: shielded.len(),
        unavailable,
    };

    if unavailable > 0 {
        warn!(
            unavailable,
            total = addresses.len(),
            "Some balances were unavailable and count as zero this cycle"
        );
    }
    info!(
        public = snapshot.totals.public,
        shielded = snapshot.totals.shielded,
        "Balances aggregated"
    );

    Ok(snapshot)
}

/// Sum readings in order; unavailable readings add nothing.
pub fn sum_readings(readings: &[BalanceReading]) -> f64 {
    readings.iter().map(BalanceReading::amount).sum()
}
