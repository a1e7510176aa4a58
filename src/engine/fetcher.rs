//! Per-address spendable balance queries.

use tracing::{debug, warn};

use crate::types::{Address, BalanceReading};
use crate::wallet::WalletCli;

/// Tag the wallet prints in front of the amount.
const TOTAL_TAG: &str = "Total:";

/// Query one address. Never fails; problems become `Unavailable`.
pub async fn fetch_balance(wallet: &WalletCli, address: &Address) -> BalanceReading {
    let Some(output) = wallet.run(&wallet.balance_command(&address.id)).await else {
        return BalanceReading::Unavailable;
    };

    let reading = parse_balance(&output);
    match reading {
        BalanceReading::Available(amount) => {
            debug!(address = %address, amount, "Balance read");
        }
        BalanceReading::Unavailable => {
            warn!(address = %address, output = %output, "Unparsable balance output");
        }
    }
    reading
}

/// Parse `Total: <decimal>` into a reading.
///
/// The tag is optional; negative, non-finite or non-numeric amounts are
/// unavailable.
pub fn parse_balance(output: &str) -> BalanceReading {
    let trimmed = output.trim();
    let amount = trimmed.strip_prefix(TOTAL_TAG).unwrap_or(trimmed).trim();

    match amount.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => BalanceReading::Available(v),
        _ => BalanceReading::Unavailable,
    }
}
