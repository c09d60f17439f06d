//! # iris-kmeans
//!
//! K-means clustering of the Iris flower dataset, compatible with ndarray.
//!
//! The flow is a plain composition of functions:
//!
//! - **Load**: [`load_samples`] reads a header-less CSV through [`COLUMN_MAP`]
//! - **Split**: [`train_test_split`] holds out a seeded random test fraction
//! - **Assemble**: [`assemble_matrix`] keeps sepal length, petal length and
//!   petal width ([`FEATURE_FIELDS`])
//! - **Fit**: [`KMeans::fit`] runs Lloyd's algorithm with k-means++ seeding
//! - **Predict**: [`ClusterModel::predict`] returns the nearest centroid and
//!   the squared distance to every centroid
//! - **Evaluate**: [`evaluate`] computes average distance and the
//!   Davies-Bouldin index
//! - **Report**: [`render_report`] formats the console output
//!
//! ## Example
//!
//! ```rust
//! use iris_kmeans::{
//!     assemble_matrix, evaluate, read_samples, render_report, train_test_split, KMeans,
//!     KMeansConfig,
//! };
//!
//! let csv = "\
//! 5.1,3.5,1.4,0.2,Iris-setosa
//! 4.9,3.0,1.4,0.2,Iris-setosa
//! 4.7,3.2,1.3,0.2,Iris-setosa
//! 7.0,3.2,4.7,1.4,Iris-versicolor
//! 6.4,3.2,4.5,1.5,Iris-versicolor
//! 6.9,3.1,4.9,1.5,Iris-versicolor
//! 6.3,3.3,6.0,2.5,Iris-virginica
//! 7.1,3.0,5.9,2.1,Iris-virginica
//! 7.6,3.0,6.6,2.1,Iris-virginica
//! 7.7,2.6,6.9,2.3,Iris-virginica
//! ";
//! let samples = read_samples(csv.as_bytes()).unwrap();
//! let partition = train_test_split(&samples, 0.2, 42).unwrap();
//!
//! let train = assemble_matrix(&partition.train);
//! let model = KMeans::new(KMeansConfig::new(2)).fit(&train.view()).unwrap();
//!
//! let test = assemble_matrix(&partition.test);
//! let predictions = model.predict_batch(&test.view()).unwrap();
//! assert_eq!(predictions.len(), partition.test.len());
//!
//! // Either metrics or a degenerate-cluster error on this tiny test set
//! if let Ok(metrics) = evaluate(&model, &test.view(), &predictions) {
//!     let lines = render_report(&metrics, &partition.test, &predictions, &[0]).unwrap();
//!     assert_eq!(lines[0], "Evaluating model:");
//! }
//! ```

mod algorithm;
mod config;
mod distance;
mod error;
mod experiment;
mod features;
mod kmeans;
mod loader;
mod metrics;
mod pipeline;
mod report;
mod sample;
mod split;

pub use config::{ExperimentConfig, InitMethod, KMeansConfig};
pub use error::{ClusteringError, Result};
pub use experiment::{run_experiment, ExperimentOutcome};
pub use features::{assemble_features, assemble_matrix, FEATURE_FIELDS, N_FEATURES};
pub use kmeans::{ClusterModel, KMeans};
pub use loader::{load_samples, read_samples, ColumnKind, ColumnSpec, COLUMN_MAP};
pub use metrics::{
    average_distance, davies_bouldin_index, evaluate, evaluate_with_labels,
    normalized_mutual_information, EvaluationMetrics,
};
pub use pipeline::{ClusteringPipeline, FittedPipeline, Transformed};
pub use report::{render_report, write_report};
pub use sample::{ClusterPrediction, Field, FlowerSample};
pub use split::{test_size, train_test_split, Partition};
