//! Metric logger trait and composites.

/// Trait for writing scalar telemetry to a backend.
///
/// Implementations are side-effect only: a failing backend must degrade
/// silently rather than surface errors through the logging path.
pub trait MetricLogger: Send + Sync {
    /// Log a scalar value (e.g. loss, accuracy) under `tag` at `step`.
    fn log_scalar(&self, tag: &str, value: f64, step: u64);

    /// Flush pending writes and release the backend.
    fn close(&self) {}
}

/// A logger that discards everything (default).
pub struct NoOpLogger;

impl MetricLogger for NoOpLogger {
    fn log_scalar(&self, _tag: &str, _value: f64, _step: u64) {}
}

/// A composite logger that dispatches to multiple backends.
pub struct CompositeLogger {
    loggers: Vec<Box<dyn MetricLogger>>,
}

impl CompositeLogger {
    pub fn new(loggers: Vec<Box<dyn MetricLogger>>) -> Self {
        Self { loggers }
    }

    pub fn add(&mut self, logger: Box<dyn MetricLogger>) {
        self.loggers.push(logger);
    }
}

impl MetricLogger for CompositeLogger {
    fn log_scalar(&self, tag: &str, value: f64, step: u64) {
        for logger in &self.loggers {
            logger.log_scalar(tag, value, step);
        }
    }

    fn close(&self) {
        for logger in &self.loggers {
            logger.close();
        }
    }
}
