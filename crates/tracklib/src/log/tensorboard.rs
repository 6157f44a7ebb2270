//! TensorBoard logging backend.

use super::MetricLogger;
use std::path::Path;
use std::sync::Mutex;
use tensorboard_rs::summary_writer::SummaryWriter;

/// Logger that writes scalar events to a TensorBoard log directory.
///
/// The event-file writer is opened at construction; write failures are
/// swallowed so a broken log directory never takes down a training run.
pub struct TensorBoardLogger {
    writer: Mutex<SummaryWriter>,
}

impl TensorBoardLogger {
    /// Directory used when none is given.
    pub const DEFAULT_DIR: &'static str = "runs";

    pub fn new(log_dir: impl AsRef<Path>) -> Self {
        let writer = SummaryWriter::new(log_dir.as_ref());
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl Default for TensorBoardLogger {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DIR)
    }
}

impl MetricLogger for TensorBoardLogger {
    fn log_scalar(&self, tag: &str, value: f64, step: u64) {
        if let Ok(mut writer) = self.writer.lock() {
            writer.add_scalar(tag, value as f32, step as usize);
            let _ = writer.flush();
        }
    }

    fn close(&self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_event_files() {
        let dir = tempdir().unwrap();
        let logger = TensorBoardLogger::new(dir.path());

        logger.log_scalar("loss", 0.25, 1);
        logger.log_scalar("loss", 0.20, 2);
        logger.close();

        // SummaryWriter creates at least one event file under the directory
        let entries: Vec<_> = walk(dir.path());
        assert!(
            !entries.is_empty(),
            "expected event files under {:?}",
            dir.path()
        );
    }

    fn walk(path: &Path) -> Vec<std::path::PathBuf> {
        let mut files = Vec::new();
        let Ok(read) = std::fs::read_dir(path) else {
            return files;
        };
        for entry in read.flatten() {
            let p = entry.path();
            if p.is_dir() {
                files.extend(walk(&p));
            } else {
                files.push(p);
            }
        }
        files
    }
}
