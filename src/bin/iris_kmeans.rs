//! Cluster the Iris dataset and print evaluation metrics plus a few predictions
//!
//! Usage: `iris-kmeans [--data <path>] [--test-fraction <f>] [--seed <n>] [--show <i>...]`
//!
//! Diagnostics are logged to stderr; set `RUST_LOG=info` or `RUST_LOG=debug` to see them.

use clap::Parser;
use iris_kmeans::{run_experiment, ExperimentConfig, InitMethod, KMeansConfig};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about = "K-means clustering of the Iris flower dataset")]
struct Opts {
    /// Comma-separated input file without a header row
    #[arg(short, long, default_value = "data/iris-data.csv")]
    data: PathBuf,

    /// Share of samples held out for evaluation, in (0, 1)
    #[arg(short, long, default_value_t = 0.2)]
    test_fraction: f64,

    /// Seed for the train/test split and centroid initialization
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Number of clusters
    #[arg(short = 'k', long, default_value_t = 3)]
    clusters: usize,

    /// Maximum k-means iterations
    #[arg(long, default_value_t = 100)]
    max_iters: usize,

    /// Centroid seeding: kmeans++ or random
    #[arg(long, default_value_t = InitMethod::KMeansPlusPlus)]
    init: InitMethod,

    /// Test-set indices to show predictions for
    #[arg(long, num_args = 1.., default_values_t = [0usize, 10, 20])]
    show: Vec<usize>,
}

impl Opts {
    fn into_config(self) -> ExperimentConfig {
        let kmeans = KMeansConfig::new(self.clusters)
            .with_max_iters(self.max_iters)
            .with_seed(self.seed)
            .with_init(self.init);

        ExperimentConfig::new(self.data)
            .with_test_fraction(self.test_fraction)
            .with_seed(self.seed)
            .with_report_indices(self.show)
            .with_kmeans(kmeans)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Opts::parse().into_config();

    let outcome = match run_experiment(&config) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in &outcome.report {
        if let Err(e) = writeln!(out, "{}", line) {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
