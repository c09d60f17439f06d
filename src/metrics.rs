use crate::error::{ClusteringError, Result};
use crate::kmeans::ClusterModel;
use crate::sample::ClusterPrediction;
use log::debug;
use ndarray::{Array2, ArrayView2};
use std::collections::HashMap;

/// Clustering quality over a set of predictions
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationMetrics {
    /// Mean squared distance of each point to its assigned centroid
    pub average_distance: f64,

    /// Davies-Bouldin index; lower is better
    pub davies_bouldin_index: f64,

    /// Agreement between clusters and true labels in [0, 1], when labels were supplied
    pub normalized_mutual_information: Option<f64>,
}

/// Compute average distance and Davies-Bouldin index.
///
/// `features` holds one row per prediction, in the same order.
///
/// # Errors
///
/// - [`ClusteringError::InvalidArgument`] if the inputs are empty or their
///   lengths disagree.
/// - [`ClusteringError::InvalidDimensions`] if the feature width does not match
///   the model.
/// - [`ClusteringError::DegenerateCluster`] if a cluster has no assigned point
///   or two centroids coincide.
pub fn evaluate(
    model: &ClusterModel,
    features: &ArrayView2<f32>,
    predictions: &[ClusterPrediction],
) -> Result<EvaluationMetrics> {
    check_inputs(model, features, predictions)?;

    let average_distance = average_distance(predictions)?;
    let davies_bouldin_index = davies_bouldin_index(model, features, predictions)?;

    debug!(
        "Evaluated {} predictions: average distance {}, Davies-Bouldin {}",
        predictions.len(),
        average_distance,
        davies_bouldin_index
    );

    Ok(EvaluationMetrics {
        average_distance,
        davies_bouldin_index,
        normalized_mutual_information: None,
    })
}

/// [`evaluate`], plus normalized mutual information against the true labels.
pub fn evaluate_with_labels<S: AsRef<str>>(
    model: &ClusterModel,
    features: &ArrayView2<f32>,
    predictions: &[ClusterPrediction],
    labels: &[S],
) -> Result<EvaluationMetrics> {
    if labels.len() != predictions.len() {
        return Err(ClusteringError::InvalidArgument(format!(
            "{} labels for {} predictions",
            labels.len(),
            predictions.len()
        )));
    }

    let mut metrics = evaluate(model, features, predictions)?;
    let clusters: Vec<u32> = predictions.iter().map(|p| p.cluster_id).collect();
    metrics.normalized_mutual_information = Some(normalized_mutual_information(labels, &clusters));

    Ok(metrics)
}

fn check_inputs(
    model: &ClusterModel,
    features: &ArrayView2<f32>,
    predictions: &[ClusterPrediction],
) -> Result<()> {
    if predictions.is_empty() {
        return Err(ClusteringError::InvalidArgument(
            "no predictions to evaluate".to_string(),
        ));
    }

    if features.nrows() != predictions.len() {
        return Err(ClusteringError::InvalidArgument(format!(
            "{} feature rows for {} predictions",
            features.nrows(),
            predictions.len()
        )));
    }

    if features.ncols() != model.d() {
        return Err(ClusteringError::InvalidDimensions(format!(
            "Expected {} features, got {}",
            model.d(),
            features.ncols()
        )));
    }

    if let Some(p) = predictions
        .iter()
        .find(|p| p.cluster_id as usize >= model.k() || p.scores.len() != model.k())
    {
        return Err(ClusteringError::InvalidArgument(format!(
            "prediction for cluster {} with {} scores does not fit a model with k = {}",
            p.cluster_id,
            p.scores.len(),
            model.k()
        )));
    }

    Ok(())
}

/// Mean of the assigned-cluster score over all predictions
///
/// Returns [`ClusteringError::InvalidArgument`] if a prediction has no score
/// for its own cluster.
pub fn average_distance(predictions: &[ClusterPrediction]) -> Result<f64> {
    if predictions.is_empty() {
        return Ok(0.0);
    }

    let mut total = 0.0f64;
    for p in predictions {
        let score = p.assigned_score().ok_or_else(|| {
            ClusteringError::InvalidArgument(format!(
                "prediction for cluster {} has only {} scores",
                p.cluster_id,
                p.scores.len()
            ))
        })?;
        total += score as f64;
    }

    Ok(total / predictions.len() as f64)
}

/// Davies-Bouldin index of the evaluated clusters
///
/// Points are grouped by predicted cluster and each group's mean is its
/// centre. scatter_i is the mean Euclidean distance of the points in cluster
/// i to that centre. For each cluster the worst ratio
/// `(scatter_i + scatter_j) / |m_i - m_j|` over `j != i` is taken, and the
/// index is the mean of those. A single cluster scores 0. The model only
/// fixes the number of clusters.
pub fn davies_bouldin_index(
    model: &ClusterModel,
    features: &ArrayView2<f32>,
    predictions: &[ClusterPrediction],
) -> Result<f64> {
    let k = model.k();
    let n_features = features.ncols();

    let mut sums: Array2<f64> = Array2::zeros((k, n_features));
    let mut counts = vec![0usize; k];

    for (row, prediction) in features.rows().into_iter().zip(predictions) {
        let cluster = cluster_index(prediction, k)?;
        let mut sum = sums.row_mut(cluster);
        for (acc, &x) in sum.iter_mut().zip(row.iter()) {
            *acc += x as f64;
        }
        counts[cluster] += 1;
    }

    if let Some(empty) = counts.iter().position(|&c| c == 0) {
        return Err(ClusteringError::DegenerateCluster(format!(
            "cluster {} has no assigned points",
            empty
        )));
    }

    if k == 1 {
        return Ok(0.0);
    }

    for (mut mean, &count) in sums.rows_mut().into_iter().zip(counts.iter()) {
        mean /= count as f64;
    }
    let means = sums;

    let mut scatter = vec![0.0f64; k];
    for (row, prediction) in features.rows().into_iter().zip(predictions) {
        let cluster = prediction.cluster_id as usize;
        scatter[cluster] += row
            .iter()
            .zip(means.row(cluster).iter())
            .map(|(&x, &m)| {
                let d = x as f64 - m;
                d * d
            })
            .sum::<f64>()
            .sqrt();
    }
    for (s, &count) in scatter.iter_mut().zip(counts.iter()) {
        *s /= count as f64;
    }

    let mut total = 0.0;
    for i in 0..k {
        let mut worst = 0.0f64;
        for j in 0..k {
            if i == j {
                continue;
            }
            let separation = (&means.row(i) - &means.row(j))
                .mapv(|d| d * d)
                .sum()
                .sqrt();
            if separation == 0.0 {
                return Err(ClusteringError::DegenerateCluster(format!(
                    "clusters {} and {} have the same centre",
                    i, j
                )));
            }
            worst = worst.max((scatter[i] + scatter[j]) / separation);
        }
        total += worst;
    }

    Ok(total / k as f64)
}

fn cluster_index(prediction: &ClusterPrediction, k: usize) -> Result<usize> {
    let cluster = prediction.cluster_id as usize;
    if cluster >= k {
        return Err(ClusteringError::InvalidArgument(format!(
            "prediction for cluster {} with k = {}",
            cluster, k
        )));
    }
    Ok(cluster)
}

/// Normalized mutual information between two labelings
///
/// `I(Y; C) / sqrt(H(Y) * H(C))`, with natural logarithms. Returns 0 when
/// either labeling has zero entropy.
pub fn normalized_mutual_information<S: AsRef<str>>(labels: &[S], clusters: &[u32]) -> f64 {
    let n = labels.len().min(clusters.len());
    if n == 0 {
        return 0.0;
    }

    let mut label_counts: HashMap<&str, usize> = HashMap::new();
    let mut cluster_counts: HashMap<u32, usize> = HashMap::new();
    let mut joint_counts: HashMap<(&str, u32), usize> = HashMap::new();

    for (label, &cluster) in labels.iter().zip(clusters) {
        let label = label.as_ref();
        *label_counts.entry(label).or_insert(0) += 1;
        *cluster_counts.entry(cluster).or_insert(0) += 1;
        *joint_counts.entry((label, cluster)).or_insert(0) += 1;
    }

    let n = n as f64;
    let h_labels = entropy(label_counts.values().copied(), n);
    let h_clusters = entropy(cluster_counts.values().copied(), n);
    if h_labels <= 0.0 || h_clusters <= 0.0 {
        return 0.0;
    }

    let mutual_information: f64 = joint_counts
        .iter()
        .map(|(&(label, cluster), &count)| {
            let p_joint = count as f64 / n;
            let p_label = label_counts[label] as f64 / n;
            let p_cluster = cluster_counts[&cluster] as f64 / n;
            p_joint * (p_joint / (p_label * p_cluster)).ln()
        })
        .sum();

    (mutual_information / (h_labels * h_clusters).sqrt()).clamp(0.0, 1.0)
}

fn entropy(counts: impl Iterator<Item = usize>, n: f64) -> f64 {
    counts
        .map(|c| {
            let p = c as f64 / n;
            -p * p.ln()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array2};

    fn predict_all(model: &ClusterModel, features: &Array2<f32>) -> Vec<ClusterPrediction> {
        model.predict_batch(&features.view()).unwrap()
    }

    #[test]
    fn test_average_distance() {
        let model = ClusterModel::from_centroids(array![[0.0f32, 0.0], [10.0, 0.0]]).unwrap();
        let features = array![[1.0f32, 0.0], [0.0, 2.0], [10.0, 0.0], [13.0, 4.0]];
        let predictions = predict_all(&model, &features);

        let metrics = evaluate(&model, &features.view(), &predictions).unwrap();
        // squared distances: 1, 4, 0, 25
        assert_relative_eq!(metrics.average_distance, 7.5, epsilon = 1e-9);
        assert!(metrics.normalized_mutual_information.is_none());
    }

    #[test]
    fn test_davies_bouldin_two_clusters() {
        let model = ClusterModel::from_centroids(array![[0.0f32, 0.0], [10.0, 0.0]]).unwrap();
        let features = array![[1.0f32, 0.0], [-1.0, 0.0], [12.0, 0.0], [8.0, 0.0]];
        let predictions = predict_all(&model, &features);

        // means (0,0) and (10,0); scatter 1 and 2, separation 10
        let dbi = davies_bouldin_index(&model, &features.view(), &predictions).unwrap();
        assert_relative_eq!(dbi, 0.3, epsilon = 1e-9);
    }

    #[test]
    fn test_davies_bouldin_three_clusters() {
        let model =
            ClusterModel::from_centroids(array![[0.0f32, 0.0], [4.0, 0.0], [0.0, 8.0]]).unwrap();
        let features = array![
            [1.0f32, 0.0],
            [-1.0, 0.0],
            [4.0, 1.0],
            [4.0, -1.0],
            [0.0, 9.0],
            [0.0, 7.0]
        ];
        let predictions = predict_all(&model, &features);

        // scatter = [1, 1, 1]; separations d01 = 4, d02 = 8, d12 = sqrt(80)
        // worst ratios: 2/4, 2/4, 2/8
        let expected = (0.5 + 0.5 + 0.25) / 3.0;
        let dbi = davies_bouldin_index(&model, &features.view(), &predictions).unwrap();
        assert_relative_eq!(dbi, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_davies_bouldin_uses_cluster_means() {
        // Each cluster is tight around its own mean, away from the model centroid
        let model = ClusterModel::from_centroids(array![[0.0f32, 0.0], [10.0, 0.0]]).unwrap();
        let features = array![[1.0f32, 0.0], [1.0, 0.0], [9.0, 0.0], [9.0, 0.0]];
        let predictions = predict_all(&model, &features);

        let dbi = davies_bouldin_index(&model, &features.view(), &predictions).unwrap();
        assert_eq!(dbi, 0.0);
    }

    #[test]
    fn test_empty_cluster_is_degenerate() {
        let model = ClusterModel::from_centroids(array![[0.0f32, 0.0], [10.0, 0.0]]).unwrap();
        let features = array![[1.0f32, 0.0], [0.0, 1.0]];
        let predictions = predict_all(&model, &features);

        let result = evaluate(&model, &features.view(), &predictions);
        assert!(matches!(result, Err(ClusteringError::DegenerateCluster(_))));
    }

    #[test]
    fn test_coincident_cluster_means_are_degenerate() {
        let model = ClusterModel::from_centroids(array![[0.0f32, 0.0], [2.0, 2.0]]).unwrap();
        let features = array![[1.0f32, 1.0], [1.0, 1.0]];
        let predictions = vec![
            ClusterPrediction {
                cluster_id: 0,
                scores: vec![2.0, 2.0],
            },
            ClusterPrediction {
                cluster_id: 1,
                scores: vec![2.0, 2.0],
            },
        ];

        let result = davies_bouldin_index(&model, &features.view(), &predictions);
        assert!(matches!(result, Err(ClusteringError::DegenerateCluster(_))));
    }

    #[test]
    fn test_average_distance_missing_score() {
        let predictions = vec![ClusterPrediction {
            cluster_id: 2,
            scores: vec![1.0, 4.0],
        }];

        assert!(matches!(
            average_distance(&predictions),
            Err(ClusteringError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_davies_bouldin_cluster_out_of_range() {
        let model = ClusterModel::from_centroids(array![[0.0f32, 0.0]]).unwrap();
        let features = array![[1.0f32, 0.0]];
        let predictions = vec![ClusterPrediction {
            cluster_id: 1,
            scores: vec![1.0],
        }];

        assert!(matches!(
            davies_bouldin_index(&model, &features.view(), &predictions),
            Err(ClusteringError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_single_cluster() {
        let model = ClusterModel::from_centroids(array![[0.0f32, 0.0]]).unwrap();
        let features = array![[1.0f32, 0.0], [0.0, 1.0]];
        let predictions = predict_all(&model, &features);

        let metrics = evaluate(&model, &features.view(), &predictions).unwrap();
        assert_eq!(metrics.davies_bouldin_index, 0.0);
        assert_relative_eq!(metrics.average_distance, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_length_mismatch() {
        let model = ClusterModel::from_centroids(array![[0.0f32, 0.0]]).unwrap();
        let features = array![[1.0f32, 0.0], [0.0, 1.0]];
        let predictions = predict_all(&model, &features);

        let result = evaluate(&model, &features.slice(ndarray::s![..1, ..]), &predictions);
        assert!(matches!(result, Err(ClusteringError::InvalidArgument(_))));

        let result = evaluate(&model, &features.view(), &[]);
        assert!(matches!(result, Err(ClusteringError::InvalidArgument(_))));
    }

    #[test]
    fn test_nmi_perfect_relabeling() {
        let labels = ["a", "a", "b", "b", "c", "c"];
        let clusters = [2, 2, 0, 0, 1, 1];
        assert_relative_eq!(
            normalized_mutual_information(&labels, &clusters),
            1.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_nmi_independent() {
        let labels = ["a", "a", "b", "b"];
        let clusters = [0, 1, 0, 1];
        assert_relative_eq!(
            normalized_mutual_information(&labels, &clusters),
            0.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_nmi_single_cluster() {
        let labels = ["a", "b", "c"];
        let clusters = [0, 0, 0];
        assert_eq!(normalized_mutual_information(&labels, &clusters), 0.0);
    }

    #[test]
    fn test_evaluate_with_labels() {
        let model = ClusterModel::from_centroids(array![[0.0f32, 0.0], [10.0, 0.0]]).unwrap();
        let features = array![[1.0f32, 0.0], [-1.0, 0.0], [12.0, 0.0], [8.0, 0.0]];
        let predictions = predict_all(&model, &features);
        let labels = vec!["x".to_string(), "x".to_string(), "y".to_string(), "y".to_string()];

        let metrics =
            evaluate_with_labels(&model, &features.view(), &predictions, &labels).unwrap();
        let nmi = metrics.normalized_mutual_information.unwrap();
        assert_relative_eq!(nmi, 1.0, epsilon = 1e-9);
    }
}
