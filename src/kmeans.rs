use crate::algorithm::run_kmeans;
use crate::config::KMeansConfig;
use crate::distance::{argmin, squared_distances_to_centroids};
use crate::error::{ClusteringError, Result};
use crate::sample::ClusterPrediction;
use ndarray::{Array2, ArrayView2};

/// K-means trainer.
///
/// Holds the configuration only; [`KMeans::fit`] returns a separate, immutable
/// [`ClusterModel`].
///
/// # Example
///
/// ```
/// use iris_kmeans::{KMeans, KMeansConfig};
/// use ndarray::array;
///
/// let data = array![[0.0f32, 0.0], [0.1, 0.1], [5.0, 5.0], [5.1, 5.1]];
/// let model = KMeans::new(KMeansConfig::new(2).with_seed(1))
///     .fit(&data.view())
///     .unwrap();
///
/// let a = model.predict(&[0.0, 0.05]).unwrap();
/// let b = model.predict(&[5.0, 5.05]).unwrap();
/// assert_ne!(a.cluster_id, b.cluster_id);
/// ```
#[derive(Debug, Clone, Default)]
pub struct KMeans {
    config: KMeansConfig,
}

impl KMeans {
    pub fn new(config: KMeansConfig) -> Self {
        Self { config }
    }

    /// Fit centroids to `data` of shape (n_samples, n_features).
    ///
    /// # Errors
    ///
    /// Returns [`ClusteringError::InvalidArgument`] if k is 0, exceeds the
    /// number of samples, or the data is empty.
    pub fn fit(&self, data: &ArrayView2<f32>) -> Result<ClusterModel> {
        let result = run_kmeans(data, &self.config)?;

        let mut cluster_sizes = vec![0; self.config.k];
        for &label in result.labels.iter() {
            cluster_sizes[label] += 1;
        }

        Ok(ClusterModel {
            centroids: result.centroids,
            cluster_sizes,
            n_iterations: result.n_iterations,
            inertia: result.inertia,
        })
    }
}

/// Fitted k-means model: one centroid per cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterModel {
    centroids: Array2<f32>,
    cluster_sizes: Vec<usize>,
    n_iterations: usize,
    inertia: f64,
}

impl ClusterModel {
    /// Build a model from known centroids of shape (k, n_features).
    ///
    /// # Errors
    ///
    /// Returns [`ClusteringError::InvalidArgument`] if there are no centroids.
    pub fn from_centroids(centroids: Array2<f32>) -> Result<Self> {
        if centroids.nrows() == 0 || centroids.ncols() == 0 {
            return Err(ClusteringError::InvalidArgument(
                "a model needs at least one centroid".to_string(),
            ));
        }

        Ok(Self {
            cluster_sizes: vec![0; centroids.nrows()],
            centroids,
            n_iterations: 0,
            inertia: 0.0,
        })
    }

    /// Assign one feature vector to its nearest centroid.
    ///
    /// `scores` holds the squared Euclidean distance to every centroid; the
    /// lowest index wins on ties.
    ///
    /// # Errors
    ///
    /// Returns [`ClusteringError::InvalidDimensions`] if `features` does not
    /// have the model's width.
    pub fn predict(&self, features: &[f32]) -> Result<ClusterPrediction> {
        if features.len() != self.d() {
            return Err(ClusteringError::InvalidDimensions(format!(
                "Expected {} features, got {}",
                self.d(),
                features.len()
            )));
        }

        let scores = squared_distances_to_centroids(features, &self.centroids.view());
        // k >= 1 is guaranteed by construction
        let cluster_id = argmin(&scores).unwrap_or(0) as u32;

        Ok(ClusterPrediction { cluster_id, scores })
    }

    /// Predict every row of `data`, in row order.
    pub fn predict_batch(&self, data: &ArrayView2<f32>) -> Result<Vec<ClusterPrediction>> {
        if data.ncols() != self.d() {
            return Err(ClusteringError::InvalidDimensions(format!(
                "Expected {} features, got {}",
                self.d(),
                data.ncols()
            )));
        }

        data.rows()
            .into_iter()
            .map(|row| self.predict(&row.to_vec()))
            .collect()
    }

    /// Get the centroids, one row per cluster.
    pub fn centroids(&self) -> &Array2<f32> {
        &self.centroids
    }

    /// Get the number of clusters.
    pub fn k(&self) -> usize {
        self.centroids.nrows()
    }

    /// Get the number of features (dimensions).
    pub fn d(&self) -> usize {
        self.centroids.ncols()
    }

    /// Number of training points assigned to each cluster.
    pub fn cluster_sizes(&self) -> &[usize] {
        &self.cluster_sizes
    }

    /// Iterations run during training.
    pub fn n_iterations(&self) -> usize {
        self.n_iterations
    }

    /// Sum of squared distances of the training points to their centroid.
    pub fn inertia(&self) -> f64 {
        self.inertia
    }
}
