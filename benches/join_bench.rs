use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tablejoin::{FieldPair, JoinConfig, JoinKind, JoinPipeline, JoinSpec, Table, Value};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    // RUST_LOG=tablejoin=debug to see per-step summaries while benchmarking
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

fn users(n: usize) -> Table {
    let data = (0..n)
        .map(|i| {
            vec![
                Value::Integer(i as i64),
                Value::text(format!("user_{}", i)),
                Value::text(format!("dept_{}", i % 16)),
            ]
        })
        .collect();
    Table::from_parts("users", &["id", "name", "dept"], data).unwrap()
}

fn orders(n: usize, users: usize) -> Table {
    let data = (0..n)
        .map(|i| {
            vec![
                Value::Integer(i as i64),
                // Every user gets several orders; a tail of orders has no user
                Value::Integer(((i * 7) % (users + users / 10)) as i64),
                Value::Float(i as f64 * 1.5),
            ]
        })
        .collect();
    Table::from_parts("orders", &["order_id", "user_id", "amount"], data).unwrap()
}

fn departments() -> Table {
    let data = (0..20)
        .map(|i| vec![Value::text(format!("DEPT_{}", i)), Value::text(format!("Manager {}", i))])
        .collect();
    Table::from_parts("departments", &["code", "manager"], data).unwrap()
}

fn two_step_joins() -> Vec<JoinSpec> {
    vec![
        JoinSpec::simple(
            "users",
            "orders",
            FieldPair::new(&["id"], &["user_id"]),
            FieldPair::new(&["name", "dept"], &["order_id", "amount"]),
            "user_orders",
        )
        .unwrap(),
        JoinSpec::simple(
            "user_orders",
            "departments",
            FieldPair::new(&["dept"], &["code"]),
            FieldPair::new(&["name", "order_id", "amount"], &["manager"]),
            "report",
        )
        .unwrap(),
    ]
}

fn bench_join_kinds(c: &mut Criterion) {
    init_logging();

    let mut group = c.benchmark_group("join_kinds");
    group.sample_size(30);

    let pipeline = JoinPipeline::new(JoinConfig::default().with_step_summaries(false));

    for size in [1_000usize, 10_000] {
        let tables = vec![users(size), orders(size * 4, size), departments()];
        let joins = two_step_joins();

        for kind in JoinKind::ALL {
            group.bench_with_input(
                BenchmarkId::new(kind.to_string(), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        let out = pipeline.execute(kind, &tables, &joins).unwrap();
                        black_box(out.len())
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_key_normalization(c: &mut Criterion) {
    let headers: Vec<String> = ["id", "name", "dept"].iter().map(|s| s.to_string()).collect();
    let codec = tablejoin::join::KeyCodec::new(&headers, &["name", "dept"]);
    let table = users(10_000);

    c.bench_function("composite_key_10k_rows", |b| {
        b.iter(|| {
            for row in &table.data {
                black_box(codec.key(row));
            }
        })
    });
}

criterion_group!(benches, bench_join_kinds, bench_key_normalization);
criterion_main!(benches);
