//! # tracklib
//!
//! Experiment tracking and training-loop utilities for `tch` models.
//!
//! ## Overview
//!
//! tracklib provides:
//! - Composable scalar sinks with the `MetricLogger` trait (console,
//!   TensorBoard, external experiment trackers)
//! - A `Tracker` that buffers per-batch losses, keeps epoch/update
//!   counters, and fans scalars out to every sink
//! - Generic `evaluate`/`update`/`fit` loop drivers - requires the `torch`
//!   feature
//!
//! ## Features
//!
//! - `default` - Tracker and sinks, including TensorBoard
//! - `torch` - Enable the loop drivers (requires libtorch)
//! - `tensorboard` - Enable the TensorBoard event-file sink
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tracklib::prelude::*;
//!
//! let loggers: Vec<Box<dyn MetricLogger>> = vec![
//!     Box::new(ConsoleLogger::new()),
//!     Box::new(TensorBoardLogger::new("runs/xor")),
//! ];
//! let config = TrackerConfig::default().with_log_every(10).with_pre_tag("train");
//! let mut tracker = Tracker::new(loggers, config)
//!     .with_metric("accuracy", tracklib::metrics::accuracy);
//!
//! tracker.track_loss(0.7);
//! let avg = tracker.summarise()?;
//! ```

pub mod log;
pub mod metrics;
pub mod track;

// Loop drivers require a tensor backend
#[cfg(feature = "torch")]
pub mod train;

/// Prelude module for convenient imports
pub mod prelude {
    #[cfg(feature = "tensorboard")]
    pub use crate::log::TensorBoardLogger;
    pub use crate::log::{
        CompositeLogger, ConsoleLogger, ExperimentLogger, ExperimentRun, MetricLogger, NoOpLogger,
    };
    pub use crate::track::{Tracker, TrackerConfig};

    #[cfg(feature = "torch")]
    pub use crate::train::{evaluate, fit, update, FitConfig};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error types for the library
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Length mismatch: ground truth has {truth} values, predictions have {preds}")]
    LengthMismatch { truth: usize, preds: usize },

    #[error("No losses tracked this epoch")]
    EmptyEpoch,

    #[cfg(feature = "torch")]
    #[error("Tensor error: {0}")]
    Tensor(#[from] tch::TchError),
}

pub type Result<T> = std::result::Result<T, TrackError>;
