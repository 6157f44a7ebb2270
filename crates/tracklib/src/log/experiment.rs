//! Experiment-tracker logging backend.

use super::MetricLogger;

/// Connection to an external experiment-tracking service.
///
/// Implement this for whatever client your tracking stack exposes (an HTTP
/// run handle, a database session, a channel into a recording thread) and
/// wrap it in an [`ExperimentLogger`].
pub trait ExperimentRun: Send + Sync {
    /// Record a scalar under `tag` at `step`.
    fn log_scalar(&self, tag: &str, value: f64, step: u64);

    /// Mark the run as finished. Default: nothing to finalize.
    fn finish(&self) {}
}

/// Logger that forwards every scalar to an externally supplied run handle.
pub struct ExperimentLogger<R: ExperimentRun> {
    run: R,
}

impl<R: ExperimentRun> ExperimentLogger<R> {
    pub fn new(run: R) -> Self {
        Self { run }
    }

    /// Access the wrapped run handle.
    pub fn run(&self) -> &R {
        &self.run
    }
}

impl<R: ExperimentRun> MetricLogger for ExperimentLogger<R> {
    fn log_scalar(&self, tag: &str, value: f64, step: u64) {
        self.run.log_scalar(tag, value, step);
    }

    fn close(&self) {
        self.run.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeRun {
        scalars: Mutex<Vec<(String, f64, u64)>>,
        finished: Mutex<bool>,
    }

    impl ExperimentRun for FakeRun {
        fn log_scalar(&self, tag: &str, value: f64, step: u64) {
            self.scalars
                .lock()
                .unwrap()
                .push((tag.to_string(), value, step));
        }

        fn finish(&self) {
            *self.finished.lock().unwrap() = true;
        }
    }

    #[test]
    fn forwards_verbatim() {
        let logger = ExperimentLogger::new(FakeRun::default());

        logger.log_scalar("valid.avg_loss", 0.125, 7);
        logger.close();

        let run = logger.run();
        assert_eq!(
            *run.scalars.lock().unwrap(),
            vec![("valid.avg_loss".to_string(), 0.125, 7)]
        );
        assert!(*run.finished.lock().unwrap());
    }
}
