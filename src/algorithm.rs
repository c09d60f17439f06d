use crate::config::{InitMethod, KMeansConfig};
use crate::distance::{compute_centroid_shift, find_nearest_centroids_chunked};
use crate::error::{ClusteringError, Result};
use log::{debug, info};
use ndarray::{s, Array1, Array2, ArrayView2};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

/// Result of the k-means algorithm
pub struct KMeansResult {
    pub centroids: Array2<f32>,
    pub labels: Array1<usize>,
    pub n_iterations: usize,
    /// Sum of squared distances of training points to their centroid
    pub inertia: f64,
}

/// Check that `data` can be clustered into `config.k` groups
pub fn validate_inputs(data: &ArrayView2<f32>, config: &KMeansConfig) -> Result<()> {
    let n_samples = data.nrows();
    let k = config.k;

    if k == 0 {
        return Err(ClusteringError::InvalidArgument(
            "k must be greater than 0".to_string(),
        ));
    }

    if n_samples == 0 || data.ncols() == 0 {
        return Err(ClusteringError::InvalidArgument(
            "training data is empty".to_string(),
        ));
    }

    if n_samples < k {
        return Err(ClusteringError::InvalidArgument(format!(
            "Number of samples ({}) is less than k ({})",
            n_samples, k
        )));
    }

    if config.max_iters == 0 {
        return Err(ClusteringError::InvalidArgument(
            "max_iters must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Run Lloyd's k-means algorithm
///
/// Centroids are seeded with [`KMeansConfig::init`] from a `ChaCha8Rng`
/// seeded with [`KMeansConfig::seed`]. Each iteration assigns every point to
/// its nearest centroid (lowest index on ties) and moves each centroid to the
/// mean of its points. Empty clusters are reseeded from a random data point.
/// Training stops when assignments stop changing, when the total centroid
/// shift drops below `tol`, or after `max_iters` iterations.
pub fn run_kmeans(data: &ArrayView2<f32>, config: &KMeansConfig) -> Result<KMeansResult> {
    validate_inputs(data, config)?;

    let n_samples = data.nrows();
    let n_features = data.ncols();
    let k = config.k;

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    debug!(
        "Training k-means: {} samples, {} features, {} clusters, {} init",
        n_samples, n_features, k, config.init
    );

    let mut centroids = match config.init {
        InitMethod::KMeansPlusPlus => initialize_plus_plus(data, k, &mut rng),
        InitMethod::Random => initialize_random(data, k, &mut rng),
    };

    let mut labels: Array1<usize> = Array1::from_elem(n_samples, usize::MAX);
    let mut n_iterations = 0;

    for iteration in 0..config.max_iters {
        let iter_start = Instant::now();
        n_iterations = iteration + 1;

        let (new_labels, _) = assign(data, &centroids, config);
        let changed = new_labels
            .iter()
            .zip(labels.iter())
            .filter(|(a, b)| a != b)
            .count();
        labels = new_labels;

        if changed == 0 {
            info!("Converged after {} iterations (assignments stable)", iteration + 1);
            break;
        }

        // Accumulators for new centroids
        let mut cluster_sums: Array2<f64> = Array2::zeros((k, n_features));
        let mut cluster_counts = vec![0usize; k];

        for (row, &label) in data.rows().into_iter().zip(labels.iter()) {
            cluster_counts[label] += 1;
            let mut sum = cluster_sums.row_mut(label);
            for (acc, &x) in sum.iter_mut().zip(row.iter()) {
                *acc += x as f64;
            }
        }

        let prev_centroids = centroids.clone();
        let mut empty_clusters = Vec::new();

        for cluster_idx in 0..k {
            let count = cluster_counts[cluster_idx];
            if count > 0 {
                for j in 0..n_features {
                    centroids[[cluster_idx, j]] =
                        (cluster_sums[[cluster_idx, j]] / count as f64) as f32;
                }
            } else {
                empty_clusters.push(cluster_idx);
            }
        }

        // Reinitialize empty clusters
        if !empty_clusters.is_empty() {
            let indices: Vec<usize> = (0..n_samples).collect();
            let random_indices: Vec<usize> = indices
                .choose_multiple(&mut rng, empty_clusters.len())
                .cloned()
                .collect();

            for (&cluster_idx, &data_idx) in empty_clusters.iter().zip(random_indices.iter()) {
                centroids.row_mut(cluster_idx).assign(&data.row(data_idx));
            }

            debug!("  Reinitialized {} empty clusters", empty_clusters.len());
        }

        let shift = compute_centroid_shift(&prev_centroids.view(), &centroids.view());

        debug!(
            "  Iteration {}/{}: {} reassigned, shift = {:.6}, time = {:.4}s",
            iteration + 1,
            config.max_iters,
            changed,
            shift,
            iter_start.elapsed().as_secs_f64()
        );

        if config.tol >= 0.0 && shift < config.tol && empty_clusters.is_empty() {
            info!(
                "Converged after {} iterations (shift {:.6} < tol {:.6})",
                iteration + 1,
                shift,
                config.tol
            );
            break;
        }
    }

    // Final labels and inertia against the returned centroids
    let (labels, dists) = assign(data, &centroids, config);
    let inertia = dists.iter().map(|&d| d as f64).sum();

    Ok(KMeansResult {
        centroids,
        labels,
        n_iterations,
        inertia,
    })
}

/// Assign every point to its nearest centroid, processing the data in chunks
fn assign(
    data: &ArrayView2<f32>,
    centroids: &Array2<f32>,
    config: &KMeansConfig,
) -> (Array1<usize>, Array1<f32>) {
    let n_samples = data.nrows();
    let chunk_size_data = config.chunk_size_data.max(1);

    let mut labels = Array1::zeros(n_samples);
    let mut dists = Array1::zeros(n_samples);

    let mut start_idx = 0;
    while start_idx < n_samples {
        let end_idx = (start_idx + chunk_size_data).min(n_samples);
        let data_chunk = data.slice(s![start_idx..end_idx, ..]);

        let (chunk_labels, chunk_dists) = find_nearest_centroids_chunked(
            &data_chunk,
            &centroids.view(),
            config.chunk_size_centroids,
        );

        labels.slice_mut(s![start_idx..end_idx]).assign(&chunk_labels);
        dists.slice_mut(s![start_idx..end_idx]).assign(&chunk_dists);

        start_idx = end_idx;
    }

    (labels, dists)
}

/// Initialize centroids by randomly selecting k distinct data points
fn initialize_random(data: &ArrayView2<f32>, k: usize, rng: &mut ChaCha8Rng) -> Array2<f32> {
    let n_samples = data.nrows();
    let n_features = data.ncols();

    let indices: Vec<usize> = (0..n_samples).collect();
    let selected: Vec<usize> = indices.choose_multiple(rng, k).cloned().collect();

    let mut centroids = Array2::zeros((k, n_features));
    for (centroid_idx, &data_idx) in selected.iter().enumerate() {
        centroids.row_mut(centroid_idx).assign(&data.row(data_idx));
    }

    centroids
}

/// k-means++ seeding
///
/// The first centroid is a uniformly random point. Each following centroid is
/// drawn with probability proportional to the squared distance of a point to
/// its nearest already chosen centroid. If every point already sits on a
/// centroid the draw falls back to a uniform pick.
fn initialize_plus_plus(
    data: &ArrayView2<f32>,
    k: usize,
    rng: &mut ChaCha8Rng,
) -> Array2<f32> {
    let n_samples = data.nrows();
    let n_features = data.ncols();

    let mut centroids = Array2::zeros((k, n_features));
    let first = rng.gen_range(0..n_samples);
    centroids.row_mut(0).assign(&data.row(first));

    let mut min_dists = Array1::from_elem(n_samples, f32::INFINITY);

    for centroid_idx in 1..k {
        // Only the newest centroid can lower the running minimum
        let newest = centroids.slice(s![centroid_idx - 1..centroid_idx, ..]);
        let (_, dists) = find_nearest_centroids_chunked(data, &newest, 1);
        for (current, &d) in min_dists.iter_mut().zip(dists.iter()) {
            if d < *current {
                *current = d;
            }
        }

        let total: f64 = min_dists.iter().map(|&d| d as f64).sum();
        let selected = if total > 0.0 {
            let threshold = rng.gen::<f64>() * total;
            let mut cumsum = 0.0;
            let mut selected = n_samples - 1;
            for (i, &d) in min_dists.iter().enumerate() {
                cumsum += d as f64;
                if cumsum > threshold {
                    selected = i;
                    break;
                }
            }
            selected
        } else {
            rng.gen_range(0..n_samples)
        };

        centroids.row_mut(centroid_idx).assign(&data.row(selected));
    }

    centroids
}
