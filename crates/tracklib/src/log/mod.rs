//! Scalar sinks.
//!
//! Provides:
//! - `MetricLogger` trait for composable backends
//! - `ConsoleLogger` for lightweight stdout logging
//! - `TensorBoardLogger` for visualization (optional)
//! - `ExperimentLogger` adapter for external experiment trackers
//! - `CompositeLogger` for multi-backend logging

mod console;
mod experiment;
mod logger;
#[cfg(feature = "tensorboard")]
mod tensorboard;

pub use console::ConsoleLogger;
pub use experiment::{ExperimentLogger, ExperimentRun};
pub use logger::{CompositeLogger, MetricLogger, NoOpLogger};
#[cfg(feature = "tensorboard")]
pub use tensorboard::TensorBoardLogger;
