use thiserror::Error;

/// Error types for the iris-kmeans pipeline
#[derive(Error, Debug)]
pub enum ClusteringError {
    /// A row of the input file is malformed
    #[error("Format error: {0}")]
    Format(String),

    /// An argument is outside its valid range (test fraction, k, empty input, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A cluster is empty or coincides with another one, so a metric is undefined
    #[error("Degenerate cluster: {0}")]
    DegenerateCluster(String),

    /// A requested sample index is past the end of the partition
    #[error("Index {index} is out of range for {len} samples")]
    IndexOutOfRange { index: usize, len: usize },

    /// Dimension mismatch between data and model
    #[error("Dimension mismatch: {0}")]
    InvalidDimensions(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, ClusteringError>;
