//! Tracker configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a [`Tracker`](super::Tracker).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Frequency, in updates, of per-batch loss emission. 0 disables it.
    pub log_every: u64,
    /// Prefix added to every emitted tag, as `"{pre_tag}.{tag}"`.
    pub pre_tag: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            log_every: 1,
            pre_tag: String::new(),
        }
    }
}

impl TrackerConfig {
    /// Set the per-batch logging cadence
    pub fn with_log_every(mut self, log_every: u64) -> Self {
        self.log_every = log_every;
        self
    }

    /// Set the tag prefix
    pub fn with_pre_tag(mut self, pre_tag: impl Into<String>) -> Self {
        self.pre_tag = pre_tag.into();
        self
    }
}
