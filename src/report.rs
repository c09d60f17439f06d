use crate::error::{ClusteringError, Result};
use crate::metrics::EvaluationMetrics;
use crate::sample::{ClusterPrediction, FlowerSample};
use std::io::Write;

/// Render the evaluation block and one line per requested test sample.
///
/// ```text
/// Evaluating model:
///    Average distance:     0.53
///    Davies-Bouldin index: 0.61
/// Predicting 3 flowers from the test set....
///    Flower: Iris-setosa, prediction: 1
/// ```
///
/// # Errors
///
/// - [`ClusteringError::InvalidArgument`] if `samples` and `predictions`
///   differ in length.
/// - [`ClusteringError::IndexOutOfRange`] if any index is not below
///   `samples.len()`. Nothing is rendered in that case.
pub fn render_report(
    metrics: &EvaluationMetrics,
    samples: &[FlowerSample],
    predictions: &[ClusterPrediction],
    indices: &[usize],
) -> Result<Vec<String>> {
    if samples.len() != predictions.len() {
        return Err(ClusteringError::InvalidArgument(format!(
            "{} samples for {} predictions",
            samples.len(),
            predictions.len()
        )));
    }

    if let Some(&index) = indices.iter().max() {
        if index >= samples.len() {
            return Err(ClusteringError::IndexOutOfRange {
                index,
                len: samples.len(),
            });
        }
    }

    let mut lines = Vec::with_capacity(4 + indices.len());
    lines.push("Evaluating model:".to_string());
    lines.push(format!("   Average distance:     {}", metrics.average_distance));
    lines.push(format!(
        "   Davies-Bouldin index: {}",
        metrics.davies_bouldin_index
    ));
    lines.push(format!(
        "Predicting {} flowers from the test set....",
        indices.len()
    ));
    for &i in indices {
        lines.push(format!(
            "   Flower: {}, prediction: {}",
            samples[i].label, predictions[i].cluster_id
        ));
    }

    Ok(lines)
}

/// [`render_report`] written line by line to `out`.
pub fn write_report<W: Write>(
    out: &mut W,
    metrics: &EvaluationMetrics,
    samples: &[FlowerSample],
    predictions: &[ClusterPrediction],
    indices: &[usize],
) -> Result<()> {
    for line in render_report(metrics, samples, predictions, indices)? {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;
    Ok(())
}
