//! rusk-monitor: recurring balance-change monitor for rusk-wallet.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod wallet;
pub mod engine;
pub mod notify;
