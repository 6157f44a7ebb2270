use std::sync::{Arc, Mutex};

use tracklib::metrics;
use tracklib::prelude::*;

type Scalars = Arc<Mutex<Vec<(String, f64, u64)>>>;

struct RecordingLogger(Scalars);

impl MetricLogger for RecordingLogger {
    fn log_scalar(&self, tag: &str, value: f64, step: u64) {
        self.0.lock().unwrap().push((tag.to_string(), value, step));
    }
}

struct RecordingRun(Scalars);

impl ExperimentRun for RecordingRun {
    fn log_scalar(&self, tag: &str, value: f64, step: u64) {
        self.0.lock().unwrap().push((tag.to_string(), value, step));
    }
}

#[test]
fn two_epoch_run_emits_the_expected_scalar_stream() {
    let scalars: Scalars = Arc::new(Mutex::new(Vec::new()));
    let mut tracker = Tracker::new(
        vec![Box::new(RecordingLogger(scalars.clone()))],
        TrackerConfig::default().with_log_every(2).with_pre_tag("train"),
    )
    .with_metric("accuracy", metrics::accuracy);

    // epoch 0: baseline, no per-step emission
    tracker.track_loss(0.9);
    tracker.track_loss(0.7);
    let baseline = tracker.summarise().unwrap();
    assert!((baseline - 0.8).abs() < 1e-12);

    // epoch 1: five steps, cadence fires on updates 2 and 4
    for loss in [0.6, 0.5, 0.4, 0.3, 0.2] {
        tracker.track_loss(loss);
    }
    tracker
        .compute_metrics(&[1.0, 0.0, 1.0], &[0.8, 0.3, 0.9])
        .unwrap();
    let avg = tracker.summarise().unwrap();
    assert!((avg - 0.4).abs() < 1e-12);

    let emitted = scalars.lock().unwrap();
    let expected = [
        ("train.avg_loss", 0.8, 0),
        ("train.loss", 0.5, 2),
        ("train.loss", 0.3, 4),
        ("train.accuracy", 1.0, 1),
        ("train.avg_loss", 0.4, 1),
    ];
    assert_eq!(emitted.len(), expected.len());
    for ((tag, value, step), (etag, evalue, estep)) in emitted.iter().zip(expected) {
        assert_eq!(tag, etag);
        assert!((value - evalue).abs() < 1e-12);
        assert_eq!(*step, estep);
    }
}

#[test]
fn fan_out_reaches_every_sink() {
    let first: Scalars = Arc::new(Mutex::new(Vec::new()));
    let second: Scalars = Arc::new(Mutex::new(Vec::new()));
    let mut tracker = Tracker::new(
        vec![
            Box::new(RecordingLogger(first.clone())),
            Box::new(ExperimentLogger::new(RecordingRun(second.clone()))),
        ],
        TrackerConfig::default(),
    );

    tracker.track_loss(0.5);
    tracker.summarise().unwrap();
    tracker.close();

    assert_eq!(*first.lock().unwrap(), *second.lock().unwrap());
    assert_eq!(first.lock().unwrap().len(), 1);
}

#[cfg(feature = "tensorboard")]
#[test]
fn tensorboard_sink_writes_event_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut tracker = Tracker::new(
        vec![Box::new(TensorBoardLogger::new(dir.path()))],
        TrackerConfig::default().with_pre_tag("train"),
    );

    tracker.track_loss(0.5);
    tracker.summarise().unwrap();
    tracker.close();

    let wrote_something = std::fs::read_dir(dir.path()).unwrap().next().is_some();
    assert!(wrote_something, "no event files under {:?}", dir.path());
}

#[cfg(feature = "torch")]
mod loops {
    use super::*;
    use tch::nn::OptimizerConfig;
    use tch::{nn, Device, Kind, Tensor};

    fn batches(count: usize, samples: i64) -> Vec<(Tensor, Tensor)> {
        (0..count)
            .map(|_| {
                let x = Tensor::randn([samples, 2], (Kind::Float, Device::Cpu));
                let y = (x.select(1, 0) + x.select(1, 1)).unsqueeze(1);
                (x, y)
            })
            .collect()
    }

    fn mse(output: &Tensor, target: &Tensor) -> Tensor {
        output.mse_loss(target, tch::Reduction::Mean)
    }

    #[test]
    fn evaluate_reports_predictions_and_metrics_to_sinks() {
        tch::manual_seed(7);
        let vs = nn::VarStore::new(Device::Cpu);
        let net = nn::seq().add(nn::linear(&vs.root() / "fc", 2, 1, Default::default()));

        let scalars: Scalars = Arc::new(Mutex::new(Vec::new()));
        let mut tracker = Tracker::new(
            vec![Box::new(RecordingLogger(scalars.clone()))],
            TrackerConfig::default().with_pre_tag("valid"),
        )
        .with_metric("rmse", metrics::rmse);

        let (avg_loss, preds) =
            evaluate(&net, batches(3, 4), mse, Device::Cpu, &mut tracker).unwrap();

        assert_eq!(preds.len(), 12);
        assert!(avg_loss.is_finite());

        let emitted = scalars.lock().unwrap();
        let tags: Vec<_> = emitted.iter().map(|(t, _, _)| t.as_str()).collect();
        assert_eq!(tags, vec!["valid.rmse", "valid.avg_loss"]);
    }

    #[test]
    fn update_zeroes_gradients_and_advances_the_epoch() {
        tch::manual_seed(8);
        let vs = nn::VarStore::new(Device::Cpu);
        let net = nn::seq().add(nn::linear(&vs.root() / "fc", 2, 1, Default::default()));
        let mut opt = nn::Adam::default().build(&vs, 1e-2).unwrap();
        let mut tracker = Tracker::new(vec![Box::new(NoOpLogger)], TrackerConfig::default());

        let avg_loss =
            update(&net, batches(3, 4), mse, &mut opt, Device::Cpu, &mut tracker).unwrap();

        assert!(avg_loss.is_finite());
        assert_eq!(tracker.epoch(), 1);
        for var in vs.variables().values() {
            let grad = var.grad();
            if grad.defined() {
                assert_eq!(grad.abs().sum(Kind::Double).double_value(&[]), 0.0);
            }
        }
    }
}
