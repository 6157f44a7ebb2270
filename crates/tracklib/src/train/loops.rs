//! Evaluation and update passes over a batch source.

use crate::track::Tracker;
use crate::{Result, TrackError};
use tch::{nn, Device, Kind, Tensor};

/// Lazily drive `batches` through `network`: move each batch to `device`,
/// run the forward pass, compute the loss, and yield
/// `(input, target, output, loss)`. Single pass, one item per batch.
fn forward_batches<'a, M, I, L>(
    network: &'a M,
    batches: I,
    loss_fn: &'a L,
    device: Device,
    train: bool,
) -> impl Iterator<Item = (Tensor, Tensor, Tensor, Tensor)> + 'a
where
    M: nn::ModuleT,
    I: Iterator<Item = (Tensor, Tensor)> + 'a,
    L: Fn(&Tensor, &Tensor) -> Tensor,
{
    batches.map(move |(input, target)| {
        let input = input.to_device(device);
        let target = target.to_device(device);
        let output = network.forward_t(&input, train);
        let loss = loss_fn(&output, &target);
        (input, target, output, loss)
    })
}

fn flatten_to_vec(t: &Tensor) -> Result<Vec<f64>> {
    let flat = t.flatten(0, -1).to_device(Device::Cpu).to_kind(Kind::Double);
    Vec::<f64>::try_from(&flat).map_err(TrackError::from)
}

/// Run one inference pass over `data`.
///
/// Gradient tracking is disabled and the network runs in inference mode.
/// Every batch loss goes through [`Tracker::track_loss`]; ground truths and
/// sigmoid-activated predictions are flattened and accumulated, registered
/// metrics are computed over them, and the epoch is closed out with
/// [`Tracker::summarise`].
///
/// Returns the epoch's mean loss and the flat prediction vector.
pub fn evaluate<M, D, L>(
    network: &M,
    data: D,
    loss_fn: L,
    device: Device,
    tracker: &mut Tracker,
) -> Result<(f64, Vec<f64>)>
where
    M: nn::ModuleT,
    D: IntoIterator<Item = (Tensor, Tensor)>,
    L: Fn(&Tensor, &Tensor) -> Tensor,
{
    let mut truths: Vec<f64> = Vec::new();
    let mut preds: Vec<f64> = Vec::new();

    tch::no_grad(|| -> Result<()> {
        for (_, target, logits, loss) in
            forward_batches(network, data.into_iter(), &loss_fn, device, false)
        {
            tracker.track_loss(loss.double_value(&[]));

            truths.extend(flatten_to_vec(&target)?);
            preds.extend(flatten_to_vec(&logits.sigmoid())?);
        }
        Ok(())
    })?;

    tracker.compute_metrics(&truths, &preds)?;
    let avg_loss = tracker.summarise()?;

    Ok((avg_loss, preds))
}

/// Run one training pass over `data`.
///
/// The network runs in training mode; each batch loss is backpropagated and
/// followed by an optimizer step, loss tracking, and a gradient reset, so
/// gradients are zeroed when the call returns.
///
/// Returns the epoch's mean loss from [`Tracker::summarise`].
pub fn update<M, D, L>(
    network: &M,
    data: D,
    loss_fn: L,
    opt: &mut nn::Optimizer,
    device: Device,
    tracker: &mut Tracker,
) -> Result<f64>
where
    M: nn::ModuleT,
    D: IntoIterator<Item = (Tensor, Tensor)>,
    L: Fn(&Tensor, &Tensor) -> Tensor,
{
    opt.zero_grad();

    for (_, _, _, loss) in forward_batches(network, data.into_iter(), &loss_fn, device, true) {
        loss.backward();
        opt.step();
        tracker.track_loss(loss.double_value(&[]));

        opt.zero_grad();
    }

    tracker.summarise()
}
