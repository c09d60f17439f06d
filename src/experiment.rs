use crate::config::ExperimentConfig;
use crate::error::Result;
use crate::loader::load_samples;
use crate::metrics::EvaluationMetrics;
use crate::pipeline::{ClusteringPipeline, Transformed};
use crate::report::render_report;
use crate::split::{train_test_split, Partition};
use log::info;

/// Everything produced by one run
#[derive(Debug, Clone)]
pub struct ExperimentOutcome {
    pub partition: Partition,
    pub transformed: Transformed,
    pub metrics: EvaluationMetrics,
    /// Rendered report, one entry per output line
    pub report: Vec<String>,
}

/// Load, split, fit, evaluate and render the report, stopping at the first error.
pub fn run_experiment(config: &ExperimentConfig) -> Result<ExperimentOutcome> {
    let samples = load_samples(&config.data_path)?;
    info!(
        "Loaded {} samples from {}",
        samples.len(),
        config.data_path.display()
    );

    let partition = train_test_split(&samples, config.test_fraction, config.seed)?;

    let fitted = ClusteringPipeline::new(config.kmeans.clone()).fit(&partition.train)?;
    let transformed = fitted.transform(&partition.test)?;
    let metrics = fitted.evaluate(&transformed, &partition.test)?;

    if let Some(nmi) = metrics.normalized_mutual_information {
        info!("Normalized mutual information: {:.4}", nmi);
    }

    let report = render_report(
        &metrics,
        &partition.test,
        &transformed.predictions,
        &config.report_indices,
    )?;

    Ok(ExperimentOutcome {
        partition,
        transformed,
        metrics,
        report,
    })
}
