use crate::config::KMeansConfig;
use crate::error::Result;
use crate::features::assemble_matrix;
use crate::kmeans::{ClusterModel, KMeans};
use crate::metrics::{evaluate_with_labels, EvaluationMetrics};
use crate::sample::{ClusterPrediction, FlowerSample};
use log::info;
use ndarray::Array2;

/// Feature assembly followed by k-means.
#[derive(Debug, Clone, Default)]
pub struct ClusteringPipeline {
    trainer: KMeans,
}

impl ClusteringPipeline {
    pub fn new(config: KMeansConfig) -> Self {
        Self {
            trainer: KMeans::new(config),
        }
    }

    /// Assemble features for `samples` and fit k-means on them.
    pub fn fit(&self, samples: &[FlowerSample]) -> Result<FittedPipeline> {
        let features = assemble_matrix(samples);
        let model = self.trainer.fit(&features.view())?;

        info!(
            "Fitted {} clusters on {} samples in {} iterations (inertia {:.4}, sizes {:?})",
            model.k(),
            samples.len(),
            model.n_iterations(),
            model.inertia(),
            model.cluster_sizes()
        );

        Ok(FittedPipeline { model })
    }
}

/// Feature matrix and predictions of a batch of samples, row-aligned.
#[derive(Debug, Clone)]
pub struct Transformed {
    pub features: Array2<f32>,
    pub predictions: Vec<ClusterPrediction>,
}

/// A pipeline with a fitted model.
#[derive(Debug, Clone)]
pub struct FittedPipeline {
    model: ClusterModel,
}

impl FittedPipeline {
    /// Assemble features and predict a cluster for every sample, in input order.
    pub fn transform(&self, samples: &[FlowerSample]) -> Result<Transformed> {
        let features = assemble_matrix(samples);
        let predictions = self.model.predict_batch(&features.view())?;
        Ok(Transformed {
            features,
            predictions,
        })
    }

    /// Score transformed samples against their true labels.
    pub fn evaluate(
        &self,
        transformed: &Transformed,
        samples: &[FlowerSample],
    ) -> Result<EvaluationMetrics> {
        let labels: Vec<&str> = samples.iter().map(|s| s.label.as_str()).collect();
        evaluate_with_labels(
            &self.model,
            &transformed.features.view(),
            &transformed.predictions,
            &labels,
        )
    }

    pub fn model(&self) -> &ClusterModel {
        &self.model
    }
}
