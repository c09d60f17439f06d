use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use iris_kmeans::{
    assemble_matrix, evaluate, load_samples, InitMethod, KMeans, KMeansConfig, N_FEATURES,
};
use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use std::path::PathBuf;
use std::time::Duration;

fn benchmark_fit_varying_samples(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit_samples");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let sample_sizes = [150, 1_000, 10_000];

    for n_samples in sample_sizes.iter() {
        group.throughput(Throughput::Elements(*n_samples as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(n_samples),
            n_samples,
            |b, &n_samples| {
                let data = Array2::random((n_samples, N_FEATURES), Uniform::new(0.0f32, 8.0));
                let kmeans = KMeans::new(KMeansConfig::new(3).with_max_iters(20).with_seed(42));

                b.iter(|| kmeans.fit(black_box(&data.view())).unwrap());
            },
        );
    }
    group.finish();
}

fn benchmark_fit_init(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit_init");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let data = Array2::random((5_000, N_FEATURES), Uniform::new(0.0f32, 8.0));

    for init in [InitMethod::KMeansPlusPlus, InitMethod::Random] {
        group.bench_with_input(BenchmarkId::from_parameter(init), &init, |b, &init| {
            let kmeans = KMeans::new(KMeansConfig::new(3).with_seed(42).with_init(init));
            b.iter(|| kmeans.fit(black_box(&data.view())).unwrap());
        });
    }
    group.finish();
}

fn benchmark_predict_and_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iris");
    group.sample_size(20);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/iris-data.csv");
    let samples = load_samples(path).unwrap();
    let features = assemble_matrix(&samples);
    let model = KMeans::new(KMeansConfig::default())
        .fit(&features.view())
        .unwrap();

    group.throughput(Throughput::Elements(samples.len() as u64));
    group.bench_function("predict_batch", |b| {
        b.iter(|| model.predict_batch(black_box(&features.view())).unwrap());
    });

    let predictions = model.predict_batch(&features.view()).unwrap();
    group.bench_function("evaluate", |b| {
        b.iter(|| evaluate(&model, black_box(&features.view()), &predictions).unwrap());
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_fit_varying_samples,
    benchmark_fit_init,
    benchmark_predict_and_evaluate,
);

criterion_main!(benches);
