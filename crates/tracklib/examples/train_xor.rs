//! Train a small MLP on noisy XOR, reporting to console and TensorBoard.
//!
//! Run with:
//!
//! ```sh
//! cargo run --example train_xor --features "torch tensorboard"
//! ```
//!
//! then `tensorboard --logdir runs/xor` to watch the curves.

use anyhow::Result;
use tch::{nn, nn::OptimizerConfig, Device, Kind, Tensor};
use tracing_subscriber::EnvFilter;

use tracklib::metrics;
use tracklib::prelude::*;

/// Binary XOR batches with a little input noise.
fn xor_batches(samples: i64, count: usize) -> Vec<(Tensor, Tensor)> {
    (0..count)
        .map(|_| {
            let bits = Tensor::rand([samples, 2], (Kind::Float, Device::Cpu)).round();
            let a = bits.select(1, 0);
            let b = bits.select(1, 1);
            let target = (&a + &b - 2.0 * &a * &b).unsqueeze(1);
            let input = &bits + Tensor::randn([samples, 2], (Kind::Float, Device::Cpu)) * 0.1;
            (input, target)
        })
        .collect()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tch::manual_seed(42);
    let device = Device::Cpu;

    let vs = nn::VarStore::new(device);
    let root = vs.root();
    let net = nn::seq()
        .add(nn::linear(&root / "fc1", 2, 16, Default::default()))
        .add_fn(|x| x.relu())
        .add(nn::linear(&root / "fc2", 16, 1, Default::default()));
    let mut opt = nn::Adam::default().build(&vs, 1e-2)?;

    let loss_fn = |logits: &Tensor, target: &Tensor| {
        logits.binary_cross_entropy_with_logits::<Tensor>(
            target,
            None,
            None,
            tch::Reduction::Mean,
        )
    };

    let mut train_tracker = Tracker::new(
        vec![
            Box::new(ConsoleLogger::new()),
            Box::new(TensorBoardLogger::new("runs/xor/train")),
        ],
        TrackerConfig::default().with_log_every(20).with_pre_tag("train"),
    );
    let mut eval_tracker = Tracker::new(
        vec![
            Box::new(ConsoleLogger::new()),
            Box::new(TensorBoardLogger::new("runs/xor/valid")),
        ],
        TrackerConfig::default().with_log_every(0).with_pre_tag("valid"),
    )
    .with_metric("accuracy", metrics::accuracy)
    .with_metric("rmse", metrics::rmse);

    let config = FitConfig::default().with_epochs(30);
    let history = fit(
        &net,
        &mut opt,
        loss_fn,
        || xor_batches(64, 8),
        || xor_batches(64, 2),
        device,
        &mut train_tracker,
        &mut eval_tracker,
        &config,
    )?;

    let (baseline, _) = history[0];
    let (train_loss, eval_loss) = *history.last().expect("history is never empty");
    tracing::info!(baseline, train_loss, eval_loss, "Run finished");

    Ok(())
}
