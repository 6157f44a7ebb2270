//! Epoch and update bookkeeping with sink fan-out.

use super::TrackerConfig;
use crate::log::MetricLogger;
use crate::{Result, TrackError};

/// Boxed metric function over flat ground-truth / prediction vectors.
pub type MetricFn = Box<dyn Fn(&[f64], &[f64]) -> f64 + Send + Sync>;

struct NamedMetric {
    name: String,
    func: MetricFn,
}

/// Tracks losses and metrics for the current epoch and fans scalars out to
/// every attached sink.
///
/// Counters are monotonic across the whole run: `epoch` advances on each
/// [`summarise`](Tracker::summarise), `update` on each
/// [`track_loss`](Tracker::track_loss) once past epoch 0. The loss buffer is
/// transient and emptied by `summarise`.
pub struct Tracker {
    loggers: Vec<Box<dyn MetricLogger>>,
    config: TrackerConfig,
    epoch: u64,
    update: u64,
    losses: Vec<f64>,
    metrics: Vec<NamedMetric>,
}

impl Tracker {
    /// Create a tracker over an ordered set of sinks.
    pub fn new(loggers: Vec<Box<dyn MetricLogger>>, config: TrackerConfig) -> Self {
        Self {
            loggers,
            config,
            epoch: 0,
            update: 0,
            losses: Vec::new(),
            metrics: Vec::new(),
        }
    }

    /// Register a named metric to compute in [`compute_metrics`](Tracker::compute_metrics).
    pub fn with_metric(
        mut self,
        name: impl Into<String>,
        func: impl Fn(&[f64], &[f64]) -> f64 + Send + Sync + 'static,
    ) -> Self {
        self.metrics.push(NamedMetric {
            name: name.into(),
            func: Box::new(func),
        });
        self
    }

    /// Register a batch of metrics with optional labels.
    ///
    /// When `names` is given it must have one label per function; otherwise
    /// metrics are labeled `metric_{index}` in registration order.
    pub fn with_metrics(mut self, funcs: Vec<MetricFn>, names: Option<Vec<String>>) -> Result<Self> {
        let names = match names {
            Some(names) => {
                if names.len() != funcs.len() {
                    return Err(TrackError::Config(format!(
                        "{} metrics but {} names",
                        funcs.len(),
                        names.len()
                    )));
                }
                names
            }
            None => (0..funcs.len()).map(|i| format!("metric_{}", i)).collect(),
        };

        for (func, name) in funcs.into_iter().zip(names) {
            self.metrics.push(NamedMetric { name, func });
        }
        Ok(self)
    }

    fn pre(&self, tag: &str) -> String {
        if self.config.pre_tag.is_empty() {
            tag.to_string()
        } else {
            format!("{}.{}", self.config.pre_tag, tag)
        }
    }

    /// Record one batch loss.
    ///
    /// Emits `"loss"` to every sink at `step = update` whenever the cadence
    /// check passes; the loss lands in the epoch buffer either way.
    pub fn track_loss(&mut self, loss: f64) {
        // epoch 0 is reserved for the untrained baseline pass, so updates
        // only start counting from epoch 1
        if self.epoch > 0 {
            self.update += 1;
        }

        if self.config.log_every > 0
            && self.update != 0
            && self.update.is_multiple_of(self.config.log_every)
        {
            for logger in &self.loggers {
                logger.log_scalar(&self.pre("loss"), loss, self.update);
            }
        }

        self.losses.push(loss);
    }

    /// Close out the epoch: emit `"avg_loss"` at `step = epoch`, clear the
    /// buffer, advance the epoch counter, and return the mean loss.
    ///
    /// Fails with [`TrackError::EmptyEpoch`] if no losses were tracked.
    pub fn summarise(&mut self) -> Result<f64> {
        if self.losses.is_empty() {
            return Err(TrackError::EmptyEpoch);
        }

        let avg_loss = self.losses.iter().sum::<f64>() / self.losses.len() as f64;
        self.losses.clear();

        for logger in &self.loggers {
            logger.log_scalar(&self.pre("avg_loss"), avg_loss, self.epoch);
        }

        self.epoch += 1;
        Ok(avg_loss)
    }

    /// Compute every registered metric over `(truth, preds)` and emit each
    /// value to every sink at `step = epoch`. Counters are untouched.
    ///
    /// No-op when no metrics are registered. Fails without emitting anything
    /// if the two slices differ in length.
    pub fn compute_metrics(&self, truth: &[f64], preds: &[f64]) -> Result<()> {
        if self.metrics.is_empty() {
            return Ok(());
        }

        if truth.len() != preds.len() {
            return Err(TrackError::LengthMismatch {
                truth: truth.len(),
                preds: preds.len(),
            });
        }

        for metric in &self.metrics {
            let value = (metric.func)(truth, preds);
            for logger in &self.loggers {
                logger.log_scalar(&self.pre(&metric.name), value, self.epoch);
            }
        }

        Ok(())
    }

    /// Flush and release every sink.
    pub fn close(&self) {
        for logger in &self.loggers {
            logger.close();
        }
    }

    /// Get current epoch
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Get current update step
    pub fn update(&self) -> u64 {
        self.update
    }

    /// Number of losses buffered so far this epoch
    pub fn buffered(&self) -> usize {
        self.losses.len()
    }
}
