use crate::error::{ClusteringError, Result};
use crate::sample::FlowerSample;
use log::debug;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Train and test partitions of a dataset
#[derive(Debug, Clone)]
pub struct Partition {
    pub train: Vec<FlowerSample>,
    pub test: Vec<FlowerSample>,
}

/// Number of samples held out for testing.
///
/// `round(n * f)`, clamped so that both sides are non-empty when `n >= 2`.
pub fn test_size(n_samples: usize, test_fraction: f64) -> usize {
    if n_samples < 2 {
        return 0;
    }
    let n_test = (n_samples as f64 * test_fraction).round() as usize;
    n_test.clamp(1, n_samples - 1)
}

/// Randomly split samples into train and test partitions.
///
/// The shuffle is driven by a `ChaCha8Rng` seeded with `seed`, so a fixed seed
/// always selects the same test rows. Both partitions keep the input order.
///
/// # Errors
///
/// Returns [`ClusteringError::InvalidArgument`] if `test_fraction` is not in
/// the open interval (0, 1) or `samples` is empty.
pub fn train_test_split(
    samples: &[FlowerSample],
    test_fraction: f64,
    seed: u64,
) -> Result<Partition> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(ClusteringError::InvalidArgument(format!(
            "test fraction must be in (0, 1), got {}",
            test_fraction
        )));
    }

    if samples.is_empty() {
        return Err(ClusteringError::InvalidArgument(
            "cannot split an empty dataset".to_string(),
        ));
    }

    let n_samples = samples.len();
    let n_test = test_size(n_samples, test_fraction);

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut indices: Vec<usize> = (0..n_samples).collect();
    indices.shuffle(&mut rng);

    let mut is_test = vec![false; n_samples];
    for &idx in &indices[..n_test] {
        is_test[idx] = true;
    }

    let mut train = Vec::with_capacity(n_samples - n_test);
    let mut test = Vec::with_capacity(n_test);
    for (sample, &held_out) in samples.iter().zip(is_test.iter()) {
        if held_out {
            test.push(sample.clone());
        } else {
            train.push(sample.clone());
        }
    }

    debug!(
        "Split {} samples into {} train / {} test (fraction {}, seed {})",
        n_samples,
        train.len(),
        test.len(),
        test_fraction,
        seed
    );

    Ok(Partition { train, test })
}
