use crate::sample::{Field, FlowerSample};
use ndarray::Array2;

/// Measurements that make up a feature vector, in column order.
///
/// Sepal width is left out. Changing this order invalidates every model fitted
/// before the change.
pub const FEATURE_FIELDS: [Field; 3] = [Field::SepalLength, Field::PetalLength, Field::PetalWidth];

/// Width of a feature vector
pub const N_FEATURES: usize = FEATURE_FIELDS.len();

/// Build the feature vector of one sample.
pub fn assemble_features(sample: &FlowerSample) -> [f32; N_FEATURES] {
    [sample.sepal_length, sample.petal_length, sample.petal_width]
}

/// Build the `(n_samples, N_FEATURES)` feature matrix of a slice of samples.
pub fn assemble_matrix(samples: &[FlowerSample]) -> Array2<f32> {
    let mut matrix = Array2::zeros((samples.len(), N_FEATURES));
    for (mut row, sample) in matrix.outer_iter_mut().zip(samples) {
        for (slot, value) in row.iter_mut().zip(assemble_features(sample)) {
            *slot = value;
        }
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_features_follow_field_order() {
        let sample = FlowerSample::new(5.9, 3.0, 5.1, 1.8, "Iris-virginica");
        let features = assemble_features(&sample);

        assert_eq!(features.len(), 3);
        for (value, field) in features.iter().zip(FEATURE_FIELDS.iter()) {
            assert_eq!(Some(*value), sample.measurement(*field));
        }
        assert!(!FEATURE_FIELDS.contains(&Field::SepalWidth));
    }

    #[test]
    fn test_features_deterministic() {
        let sample = FlowerSample::new(4.9, 3.1, 1.5, 0.1, "Iris-setosa");
        assert_eq!(assemble_features(&sample), assemble_features(&sample));
    }

    #[test]
    fn test_assemble_matrix() {
        let samples = vec![
            FlowerSample::new(5.1, 3.5, 1.4, 0.2, "Iris-setosa"),
            FlowerSample::new(7.0, 3.2, 4.7, 1.4, "Iris-versicolor"),
        ];
        let matrix = assemble_matrix(&samples);

        assert_eq!(matrix.dim(), (2, 3));
        assert_eq!(matrix.row(0).to_vec(), vec![5.1, 1.4, 0.2]);
        assert_eq!(matrix.row(1).to_vec(), vec![7.0, 4.7, 1.4]);
    }

    #[test]
    fn test_assemble_empty() {
        let matrix = assemble_matrix(&[]);
        assert_eq!(matrix.dim(), (0, 3));
    }
}
