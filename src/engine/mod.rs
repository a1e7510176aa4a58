//! Core engine: the discover → fetch → aggregate → detect loop.

pub mod discovery;
pub mod fetcher;
pub mod aggregator;
pub mod detector;
pub mod scheduler;

pub use detector::{detect, Detection};
pub use scheduler::{CycleReport, Monitor, MonitorSettings};
