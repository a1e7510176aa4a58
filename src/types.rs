//! Shared types for the balance monitor.
//!
//! Addresses, readings, totals and the retained monitor state form the
//! data model passed between the engine stages. None of these types hold
//! process handles or I/O resources, so they move freely between cycles.

use std::fmt;

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// The two balance categories tracked by the wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressClass {
    Public,
    Shielded,
}

impl AddressClass {
    /// Marker the wallet prints in front of addresses of this class.
    pub fn marker(&self) -> &'static str {
        match self {
            AddressClass::Public => "Public account",
            AddressClass::Shielded => "Shielded account",
        }
    }
}

impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressClass::Public => write!(f, "public"),
            AddressClass::Shielded => write!(f, "shielded"),
        }
    }
}

/// A wallet address as listed by the profiles command.
///
/// Re-discovered every cycle; no identity is assumed across cycles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    pub class: AddressClass,
    pub id: String,
}

impl Address {
    pub fn new(class: AddressClass, id: impl Into<String>) -> Self {
        Self {
            class,
            id: id.into(),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.class, self.id)
    }
}

/// Addresses found in one profile listing, in listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredAddresses {
    pub public: Vec<Address>,
    pub shielded: Vec<Address>,
}

impl DiscoveredAddresses {
    pub fn is_empty(&self) -> bool {
        self.public.is_empty() && self.shielded.is_empty()
    }

    pub fn len(&self) -> usize {
        self.public.len() + self.shielded.len()
    }
}

// ---------------------------------------------------------------------------
// Readings & totals
// ---------------------------------------------------------------------------

/// Spendable balance of one address for one cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BalanceReading {
    Available(f64),
    /// The query failed or its output could not be parsed.
    Unavailable,
}

impl BalanceReading {
    /// Amount contributed to the class total. Unavailable counts as zero.
    pub fn amount(&self) -> f64 {
        match self {
            BalanceReading::Available(v) => *v,
            BalanceReading::Unavailable => 0.0,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, BalanceReading::Available(_))
    }
}

/// Per-class sums for a single cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AggregateTotals {
    pub public: f64,
    pub shielded: f64,
}

impl AggregateTotals {
    pub const ZERO: AggregateTotals = AggregateTotals {
        public: 0.0,
        shielded: 0.0,
    };

    pub fn new(public: f64, shielded: f64) -> Self {
        Self { public, shielded }
    }

    /// Sum of both classes; the change detector gates on this.
    pub fn combined(&self) -> f64 {
        self.public + self.shielded
    }
}

impl fmt::Display for AggregateTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "public={:?} shielded={:?}", self.public, self.shielded)
    }
}

/// What the aggregator observed in one cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleSnapshot {
    pub totals: AggregateTotals,
    pub public_addresses: usize,
    pub shielded_addresses: usize,
    /// Readings that failed and were counted as zero.
    pub unavailable: usize,
}

// ---------------------------------------------------------------------------
// Monitor state
// ---------------------------------------------------------------------------

/// Retained state between cycles.
///
/// Owned by the scheduler and moved through each cycle; a cycle that
/// fails hands back nothing, so the previous value stays in force.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorState {
    pub previous: AggregateTotals,
    /// No baseline yet; the next successful cycle only records totals.
    pub first_cycle: bool,
    /// "Starting up!" has already been delivered.
    pub announced: bool,
}

impl MonitorState {
    pub fn new() -> Self {
        Self {
            previous: AggregateTotals::ZERO,
            first_cycle: true,
            announced: false,
        }
    }
}

impl Default for MonitorState {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// A message the change detector asks to be delivered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notification {
    Startup,
    PublicChanged { old: f64, new: f64 },
    ShieldedChanged { old: f64, new: f64 },
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::Startup => write!(f, "Starting up!"),
            Notification::PublicChanged { old, new } => {
                write!(f, "Public balance changed: {old:?} → {new:?}")
            }
            Notification::ShieldedChanged { old, new } => {
                write!(f, "Shielded balance changed: {old:?} → {new:?}")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for the monitor.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("Failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command `{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Address discovery failed: {0}")]
    Discovery(String),

    #[error("Neither environment variable '{primary}' nor '{fallback}' holds a wallet password")]
    MissingCredential { primary: String, fallback: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Notification error ({channel}): {message}")]
    Notification { channel: String, message: String },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
