//! Address discovery from the wallet's profile listing.
//!
//! The listing is free-form text; only lines carrying one of the account
//! markers matter. Anything else, including marker lines without a usable
//! address, is skipped without error.

use tracing::{debug, info};

use crate::types::{Address, AddressClass, DiscoveredAddresses, MonitorError};
use crate::wallet::WalletCli;

/// Separator printed between the marker and the address.
const SEPARATOR: char = '-';

/// Run the profiles command and parse its output.
///
/// An absent listing (the command failed or printed nothing) is an error:
/// the cycle has nothing meaningful to compare.
pub async fn discover(wallet: &WalletCli) -> Result<DiscoveredAddresses, MonitorError> {
    let command = wallet.profiles_command();
    let listing = wallet
        .run(&command)
        .await
        .ok_or_else(|| MonitorError::Discovery(format!("no output from `{command}`")))?;

    let found = parse_profiles(&listing);
    info!(
        public = found.public.len(),
        shielded = found.shielded.len(),
        "Addresses discovered"
    );
    Ok(found)
}

/// Parse a profile listing into public and shielded addresses.
pub fn parse_profiles(listing: &str) -> DiscoveredAddresses {
    let mut found = DiscoveredAddresses::default();

    for line in listing.lines() {
        // Shielded wins when a line carries both markers.
        let class = if line.contains(AddressClass::Shielded.marker()) {
            AddressClass::Shielded
        } else if line.contains(AddressClass::Public.marker()) {
            AddressClass::Public
        } else {
            continue;
        };

        match extract_address(line, class.marker()) {
            Some(id) => {
                let address = Address::new(class, id);
                match class {
                    AddressClass::Public => found.public.push(address),
                    AddressClass::Shielded => found.shielded.push(address),
                }
            }
            None => debug!(line, "Skipping account line without address"),
        }
    }

    found
}

/// First token after `<marker> -`, tolerating any whitespace around the
/// separator.
fn extract_address<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let (_, rest) = line.split_once(marker)?;
    let rest = rest.trim_start().strip_prefix(SEPARATOR)?;
    rest.split_whitespace().next()
}
