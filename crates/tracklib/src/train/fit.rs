//! Multi-epoch fit driver.

use super::loops::{evaluate, update};
use crate::track::Tracker;
use crate::Result;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tch::{nn, Device, Tensor};

/// Configuration for [`fit`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FitConfig {
    /// Number of training epochs after the baseline pass
    pub epochs: usize,
    /// Draw a progress bar
    pub progress: bool,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            epochs: 10,
            progress: true,
        }
    }
}

impl FitConfig {
    /// Set the number of training epochs
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Enable or disable the progress bar
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }
}

/// Run a full training session: one baseline inference pass, then
/// `config.epochs` rounds of [`update`] over the training batches followed
/// by [`evaluate`] over the evaluation batches.
///
/// The batch sources are factories because each pass consumes a fresh
/// single-use iterator. The baseline pass runs over both sources so both
/// trackers move past epoch 0 and per-batch cadence logging is live from
/// the first training epoch.
///
/// Returns `(train, eval)` mean losses per epoch, baseline entry first.
/// Both trackers are closed before returning.
#[allow(clippy::too_many_arguments)]
pub fn fit<M, L, TB, TI, EB, EI>(
    network: &M,
    opt: &mut nn::Optimizer,
    loss_fn: L,
    mut train_batches: TB,
    mut eval_batches: EB,
    device: Device,
    train_tracker: &mut Tracker,
    eval_tracker: &mut Tracker,
    config: &FitConfig,
) -> Result<Vec<(f64, f64)>>
where
    M: nn::ModuleT,
    L: Fn(&Tensor, &Tensor) -> Tensor,
    TB: FnMut() -> TI,
    TI: IntoIterator<Item = (Tensor, Tensor)>,
    EB: FnMut() -> EI,
    EI: IntoIterator<Item = (Tensor, Tensor)>,
{
    let mut history = Vec::with_capacity(config.epochs + 1);

    let (baseline_train, _) = evaluate(network, train_batches(), &loss_fn, device, train_tracker)?;
    let (baseline_eval, _) = evaluate(network, eval_batches(), &loss_fn, device, eval_tracker)?;
    history.push((baseline_train, baseline_eval));

    let progress = if config.progress {
        let pb = ProgressBar::new(config.epochs as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .unwrap(),
        );
        Some(pb)
    } else {
        None
    };

    for _ in 0..config.epochs {
        let train_loss = update(
            network,
            train_batches(),
            &loss_fn,
            opt,
            device,
            train_tracker,
        )?;
        let (eval_loss, _) = evaluate(network, eval_batches(), &loss_fn, device, eval_tracker)?;
        history.push((train_loss, eval_loss));

        if let Some(ref pb) = progress {
            pb.set_message(format!("Loss: {:.4}", train_loss));
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_with_message("Training complete");
    }

    tracing::info!(epochs = config.epochs, "Fit complete");

    train_tracker.close();
    eval_tracker.close();

    Ok(history)
}
