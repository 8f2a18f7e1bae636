use rand::{seq::SliceRandom, Rng};

use crate::estimator::{Example, Mode, ValueEstimator};

/// Trains `estimator` on `data` for `epochs` passes of shuffled mini-batches.
///
/// Returns the mean batch loss over the whole data set after each epoch.
/// Nothing is trained on an empty data set.
pub fn fit<E, R>(
    estimator: &mut E,
    data: &mut [Example],
    epochs: usize,
    batch_size: usize,
    rng: &mut R,
) -> Vec<f32>
where
    E: ValueEstimator + ?Sized,
    R: Rng + ?Sized,
{
    assert!(batch_size > 0, "batch size must be positive");
    if data.is_empty() {
        log::warn!("no training data");
        return Vec::new();
    }

    let mut losses = Vec::with_capacity(epochs);
    for epoch in 0..epochs {
        data.shuffle(rng);

        estimator.set_mode(Mode::Training);
        for batch in data.chunks(batch_size) {
            estimator.train_step(batch);
        }

        estimator.set_mode(Mode::Inference);
        let batches = data.chunks(batch_size);
        let count = batches.len();
        let loss = batches.map(|batch| estimator.loss(batch)).sum::<f32>() / count as f32;
        log::info!("epoch {epoch} | loss {loss:.4e}");
        losses.push(loss);
    }
    losses
}
