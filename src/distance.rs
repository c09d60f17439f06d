use ndarray::{Array1, ArrayView1, ArrayView2, Zip};
use rayon::prelude::*;

/// Find the nearest centroid for each data point in a chunk using centroid chunking
///
/// Distances are summed directly from coordinate differences, in the same
/// order as [`squared_distances_to_centroids`], so training assignments agree
/// bit for bit with prediction. Centroid chunks are visited in index order and
/// only a strictly smaller distance replaces the current best, so ties go to
/// the lowest centroid index.
///
/// # Arguments
/// * `data_chunk` - Chunk of data points (n_data, n_features)
/// * `centroids` - All centroids (k, n_features)
/// * `chunk_size_centroids` - Size of centroid chunks
///
/// # Returns
/// * `(labels, distances)` - Cluster assignment and squared distance to it
///   for each data point (n_data,)
pub fn find_nearest_centroids_chunked(
    data_chunk: &ArrayView2<f32>,
    centroids: &ArrayView2<f32>,
    chunk_size_centroids: usize,
) -> (Array1<usize>, Array1<f32>) {
    let n_data = data_chunk.nrows();
    let k = centroids.nrows();
    let chunk_size_centroids = chunk_size_centroids.max(1);

    let mut best_labels = Array1::zeros(n_data);
    let mut best_dists = Array1::from_elem(n_data, f32::INFINITY);

    // Process centroids in chunks
    let mut c_start = 0;
    while c_start < k {
        let c_end = (c_start + chunk_size_centroids).min(k);
        let centroid_chunk = centroids.slice(ndarray::s![c_start..c_end, ..]);

        Zip::from(&mut best_labels)
            .and(&mut best_dists)
            .and(data_chunk.rows())
            .par_for_each(|label, best_dist, row| {
                for (j, centroid) in centroid_chunk.rows().into_iter().enumerate() {
                    let dist = squared_euclidean(row.iter().copied(), centroid.iter().copied());

                    if dist < *best_dist {
                        *best_dist = dist;
                        *label = c_start + j;
                    }
                }
            });

        c_start = c_end;
    }

    (best_labels, best_dists)
}

/// Squared Euclidean distance from `point` to every centroid, in centroid order
pub fn squared_distances_to_centroids(point: &[f32], centroids: &ArrayView2<f32>) -> Vec<f32> {
    centroids
        .rows()
        .into_iter()
        .map(|centroid| squared_euclidean(point.iter().copied(), centroid.iter().copied()))
        .collect()
}

/// Index of the smallest value; the first one wins on ties
pub fn argmin(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v >= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Euclidean distance between two rows, accumulated in f64
pub fn euclidean_distance(a: &ArrayView1<f32>, b: &ArrayView1<f32>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = (x - y) as f64;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

fn squared_euclidean(
    point: impl Iterator<Item = f32>,
    centroid: impl Iterator<Item = f32>,
) -> f32 {
    point
        .zip(centroid)
        .map(|(x, c)| {
            let d = x - c;
            d * d
        })
        .sum()
}

/// Compute centroid shift (sum of L2 norms of centroid movements)
pub fn compute_centroid_shift(
    old_centroids: &ArrayView2<f32>,
    new_centroids: &ArrayView2<f32>,
) -> f64 {
    let k = old_centroids.nrows();

    (0..k)
        .into_par_iter()
        .map(|i| euclidean_distance(&old_centroids.row(i), &new_centroids.row(i)))
        .sum()
}
