//! Loss and metric bookkeeping.
//!
//! Provides:
//! - `TrackerConfig` - cadence and tag-prefix configuration
//! - `Tracker` - per-epoch loss buffer, step counters, and sink fan-out

mod config;
mod tracker;

pub use config::TrackerConfig;
pub use tracker::{MetricFn, Tracker};
