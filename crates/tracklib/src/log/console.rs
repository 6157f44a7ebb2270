//! Console logging backend.

use super::MetricLogger;

/// Logger that prints scalars to stdout via tracing.
pub struct ConsoleLogger;

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLogger {
    pub fn new() -> Self {
        Self
    }
}

impl MetricLogger for ConsoleLogger {
    fn log_scalar(&self, tag: &str, value: f64, step: u64) {
        tracing::info!("Step {}: {} = {:.4}", step, tag, value);
    }
}
