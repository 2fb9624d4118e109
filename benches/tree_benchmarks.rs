use classification_tree::{ClassificationTree, Classifier, Example, Inducer};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

fn make_examples(n: usize, n_features: usize, seed: u64) -> (Vec<Example>, Vec<String>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut examples: Vec<Example> = Vec::with_capacity(n);
    let mut labels = Vec::with_capacity(n);
    for _ in 0..n {
        let values: Vec<f64> = (0..n_features).map(|_| rng.gen_range(0..100) as f64).collect();
        let score: f64 = values.iter().take(3).sum();
        labels.push(if score > 150.0 { "spam" } else { "ham" }.to_string());
        examples.push(values.iter().enumerate().map(|(i, v)| (format!("f{}", i), *v)).collect());
    }
    (examples, labels)
}

pub fn tree_benchmarks(c: &mut Criterion) {
    let (examples, labels) = make_examples(5000, 10, 0);

    c.bench_function("induce 5000 examples", |b| {
        b.iter(|| {
            let mut inducer = Inducer::new();
            for (example, label) in examples.iter().zip(&labels) {
                inducer.insert(example.clone(), label.as_str()).unwrap();
            }
            black_box(inducer.finish().unwrap())
        })
    });

    let tree = ClassificationTree::from_examples(examples.clone(), labels.clone()).unwrap();
    let text = tree.to_text().unwrap();

    c.bench_function("save", |b| b.iter(|| black_box(tree.to_text().unwrap())));
    c.bench_function("load", |b| {
        b.iter(|| black_box(ClassificationTree::from_text(black_box(&text)).unwrap()))
    });
    c.bench_function("classify", |b| {
        b.iter(|| {
            for example in examples.iter().take(1000) {
                black_box(tree.classify(black_box(example)).unwrap());
            }
        })
    });

    let mut group = c.benchmark_group("classify_all");
    group.measurement_time(Duration::from_secs(10));
    group.bench_function("sequential", |b| b.iter(|| black_box(tree.classify_all(&examples).unwrap())));
    let parallel = tree.clone().set_parallel(true);
    group.bench_function("parallel", |b| b.iter(|| black_box(parallel.classify_all(&examples).unwrap())));
    group.finish();
}

criterion_group!(benches, tree_benchmarks);
criterion_main!(benches);
