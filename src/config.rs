use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Centroid seeding strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitMethod {
    /// k-means++: first centroid uniformly at random, each next one sampled
    /// with probability proportional to its squared distance to the nearest
    /// centroid chosen so far
    #[default]
    KMeansPlusPlus,

    /// k distinct data points chosen uniformly at random
    Random,
}

impl fmt::Display for InitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitMethod::KMeansPlusPlus => f.write_str("kmeans++"),
            InitMethod::Random => f.write_str("random"),
        }
    }
}

impl FromStr for InitMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "kmeans++" | "kmeans-plus-plus" | "plusplus" => Ok(InitMethod::KMeansPlusPlus),
            "random" => Ok(InitMethod::Random),
            other => Err(format!(
                "unknown init method '{}', expected 'kmeans++' or 'random'",
                other
            )),
        }
    }
}

/// Configuration for the k-means trainer
#[derive(Debug, Clone)]
pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,

    /// Maximum number of iterations
    pub max_iters: usize,

    /// Convergence tolerance. When centroid shift is below this threshold,
    /// the algorithm stops early. Set to negative value to disable this check;
    /// training still stops once assignments no longer change.
    pub tol: f64,

    /// Random seed for centroid initialization and empty-cluster reseeding
    pub seed: u64,

    /// Centroid seeding strategy
    pub init: InitMethod,

    /// Chunk size for data processing. Larger values use more memory but may be faster.
    pub chunk_size_data: usize,

    /// Chunk size for centroid processing. Larger values use more memory but may be faster.
    pub chunk_size_centroids: usize,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 3,
            max_iters: 100,
            tol: 1e-6,
            seed: 0,
            init: InitMethod::KMeansPlusPlus,
            chunk_size_data: 51_200,
            chunk_size_centroids: 10_240,
        }
    }
}

impl KMeansConfig {
    /// Create a new configuration with the specified number of clusters
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    /// Set the maximum number of iterations
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Set the convergence tolerance
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the centroid seeding strategy
    pub fn with_init(mut self, init: InitMethod) -> Self {
        self.init = init;
        self
    }

    /// Set the data chunk size
    pub fn with_chunk_size_data(mut self, chunk_size: usize) -> Self {
        self.chunk_size_data = chunk_size;
        self
    }

    /// Set the centroid chunk size
    pub fn with_chunk_size_centroids(mut self, chunk_size: usize) -> Self {
        self.chunk_size_centroids = chunk_size;
        self
    }
}

/// Parameters of one load/split/fit/evaluate/report run
#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    /// Comma-separated input file
    pub data_path: PathBuf,

    /// Share of samples held out for evaluation
    pub test_fraction: f64,

    /// Seed for the train/test split
    pub seed: u64,

    /// Test-set indices shown in the report
    pub report_indices: Vec<usize>,

    /// Trainer settings
    pub kmeans: KMeansConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/iris-data.csv"),
            test_fraction: 0.2,
            seed: 0,
            report_indices: vec![0, 10, 20],
            kmeans: KMeansConfig::default(),
        }
    }
}

impl ExperimentConfig {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            ..Default::default()
        }
    }

    pub fn with_test_fraction(mut self, test_fraction: f64) -> Self {
        self.test_fraction = test_fraction;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_report_indices(mut self, indices: Vec<usize>) -> Self {
        self.report_indices = indices;
        self
    }

    pub fn with_kmeans(mut self, kmeans: KMeansConfig) -> Self {
        self.kmeans = kmeans;
        self
    }
}
