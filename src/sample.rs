use std::fmt;

/// Columns of a flower record, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    SepalLength,
    SepalWidth,
    PetalLength,
    PetalWidth,
    Label,
}

impl Field {
    /// Column name as used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Field::SepalLength => "sepal_length",
            Field::SepalWidth => "sepal_width",
            Field::PetalLength => "petal_length",
            Field::PetalWidth => "petal_width",
            Field::Label => "label",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single labeled iris flower.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowerSample {
    pub sepal_length: f32,
    pub sepal_width: f32,
    pub petal_length: f32,
    pub petal_width: f32,
    pub label: String,
}

impl FlowerSample {
    pub fn new(
        sepal_length: f32,
        sepal_width: f32,
        petal_length: f32,
        petal_width: f32,
        label: impl Into<String>,
    ) -> Self {
        Self {
            sepal_length,
            sepal_width,
            petal_length,
            petal_width,
            label: label.into(),
        }
    }

    /// Numeric value of a measurement field.
    ///
    /// Returns `None` for [`Field::Label`].
    pub fn measurement(&self, field: Field) -> Option<f32> {
        match field {
            Field::SepalLength => Some(self.sepal_length),
            Field::SepalWidth => Some(self.sepal_width),
            Field::PetalLength => Some(self.petal_length),
            Field::PetalWidth => Some(self.petal_width),
            Field::Label => None,
        }
    }

    /// Mutable access to a measurement field, `None` for [`Field::Label`].
    pub fn measurement_mut(&mut self, field: Field) -> Option<&mut f32> {
        match field {
            Field::SepalLength => Some(&mut self.sepal_length),
            Field::SepalWidth => Some(&mut self.sepal_width),
            Field::PetalLength => Some(&mut self.petal_length),
            Field::PetalWidth => Some(&mut self.petal_width),
            Field::Label => None,
        }
    }
}

/// Cluster assignment for one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterPrediction {
    /// Index of the nearest centroid, in `[0, k)`
    pub cluster_id: u32,

    /// Squared Euclidean distance to every centroid, in centroid order
    pub scores: Vec<f32>,
}

impl ClusterPrediction {
    /// Score of the assigned cluster, `None` if `scores` has no entry for it.
    pub fn assigned_score(&self) -> Option<f32> {
        self.scores.get(self.cluster_id as usize).copied()
    }
}
