use criterion::{black_box, criterion_group, criterion_main, Criterion};
use teller::{
    CategoryEncoder, DecisionTree, EncoderRegistry, ForestModel, InputRecord, Predictor, TreeNode,
    SCHEMA,
};

const COLUMNS: [&str; 16] = [
    "age", "balance", "day", "duration", "campaign", "pdays", "previous", "job", "marital",
    "education", "default", "housing", "loan", "contact", "month", "poutcome",
];

fn synthetic_model(tree_count: usize) -> ForestModel {
    let trees = (0..tree_count)
        .map(|i| {
            let feature = (i % COLUMNS.len()) as i32;
            let low = [(i % 7) as f32 + 1.0, (i % 3) as f32 + 1.0];
            let high = [(i % 3) as f32 + 1.0, (i % 7) as f32 + 1.0];
            DecisionTree {
                nodes: vec![
                    TreeNode { feature, threshold: (i % 50) as f32, left: 1, right: 2, value: [0.0, 0.0] },
                    TreeNode { feature: -2, threshold: 0.0, left: -1, right: -1, value: low },
                    TreeNode { feature: -2, threshold: 0.0, left: -1, right: -1, value: high },
                ],
            }
        })
        .collect();
    ForestModel::new(
        COLUMNS.iter().map(|c| c.to_string()).collect(),
        trees,
        vec![1.0 / COLUMNS.len() as f32; COLUMNS.len()],
    )
}

fn synthetic_registry() -> EncoderRegistry {
    let mut registry = EncoderRegistry::new();
    for spec in SCHEMA.iter().filter(|s| s.is_categorical()) {
        let vocabulary: Vec<String> = (0..10).map(|i| format!("{}_{}", spec.name, i)).collect();
        registry.insert(spec.name, CategoryEncoder::new(vocabulary));
    }
    registry
}

fn setup_predictor(tree_count: usize) -> Predictor {
    Predictor::builder()
        .with_artifacts(synthetic_model(tree_count), synthetic_registry())
        .unwrap()
        .build()
        .unwrap()
}

fn sample_record() -> InputRecord {
    let mut builder = InputRecord::builder();
    for spec in SCHEMA.iter() {
        builder = match spec.kind {
            teller::FieldKind::BoundedInt { default, .. } => {
                builder.set_number(spec.name, default as f32).unwrap()
            }
            teller::FieldKind::Unbounded { default } => {
                builder.set_number(spec.name, default).unwrap()
            }
            teller::FieldKind::Categorical => {
                builder.set_label(spec.name, format!("{}_0", spec.name)).unwrap()
            }
        };
    }
    builder.build()
}

fn bench_encoding(c: &mut Criterion) {
    let predictor = setup_predictor(100);
    let record = sample_record();
    let mut group = c.benchmark_group("Encoding");

    // Configure sampling
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    group.bench_function("encode_record", |b| {
        b.iter(|| predictor.encode(black_box(&record)).unwrap())
    });

    group.finish();
}

fn bench_prediction(c: &mut Criterion) {
    let predictor = setup_predictor(100);
    let record = sample_record();
    let mut group = c.benchmark_group("Prediction");
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    group.bench_function("predict_full_pipeline", |b| {
        b.iter(|| predictor.predict(black_box(&record)).unwrap())
    });

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let record = sample_record();
    let mut group = c.benchmark_group("Scaling");
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    // Test scaling with forest size
    let tree_counts = [1, 10, 100, 500];
    for &count in &tree_counts {
        let predictor = setup_predictor(count);
        group.bench_function(format!("trees_{}", count), |b| {
            b.iter(|| predictor.predict(black_box(&record)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encoding, bench_prediction, bench_scaling);
criterion_main!(benches);
