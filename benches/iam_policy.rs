use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use policy_engine_rs::{Effect, FieldMatcher, Policy, PolicyEngine, PolicyStore};
use std::sync::Arc;

/// Create a policy set mixing scalar, list and wildcard fields
fn create_complex_policies() -> Vec<Policy> {
    vec![
        Policy::new("public-read", Effect::Allow, "*", "s3:GetObject", "bucket/public/*"),
        Policy::new(
            "team-docs",
            Effect::Allow,
            vec!["team:alice", "team:bob", "team:carol"],
            vec!["s3:GetObject", "s3:PutObject"],
            "bucket/users/*/documents/*",
        ),
        Policy::new("system-lock", Effect::Deny, "*", "s3:*", "bucket/system/*"),
    ]
}

fn engine(policies: Vec<Policy>, cache_capacity: usize) -> PolicyEngine {
    PolicyEngine::with_cache(Arc::new(PolicyStore::with_policies(policies)), cache_capacity)
}

/// Benchmark policy evaluation with cache (hot path)
fn bench_policy_eval_cached(c: &mut Criterion) {
    let eval_counts = vec![100, 1_000, 10_000];

    let mut group = c.benchmark_group("policy_eval_cached");

    for count in eval_counts {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let engine = engine(create_complex_policies(), 1024);

            b.iter(|| {
                // Repeatedly evaluate same request (should hit cache)
                for _ in 0..count {
                    let allowed = engine.can_access("anyone", "s3:GetObject", "bucket/public/readme.md");
                    black_box(allowed);
                }
            });
        });
    }

    group.finish();
}

/// Benchmark policy evaluation without cache (cold path)
fn bench_policy_eval_uncached(c: &mut Criterion) {
    let eval_counts = vec![100, 1_000, 5_000];

    let mut group = c.benchmark_group("policy_eval_uncached");

    for count in eval_counts {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let engine = engine(create_complex_policies(), 0);

            b.iter(|| {
                for i in 0..count {
                    let path = format!("bucket/public/file_{}.txt", i);
                    let allowed = engine.can_access("anyone", "s3:GetObject", &path);
                    black_box(allowed);
                }
            });
        });
    }

    group.finish();
}

/// Benchmark cache hit rate measurement
fn bench_cache_hit_rate(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_hit_rate");

    group.bench_function("90_percent_hit_rate", |b| {
        let engine = engine(create_complex_policies(), 1024);

        b.iter(|| {
            // 90% access to same 10 paths (hot set)
            for _ in 0..90 {
                let i = rand::random::<usize>() % 10;
                let path = format!("bucket/public/file_{}.txt", i);
                black_box(engine.can_access("anyone", "s3:GetObject", &path));
            }

            // 10% access to unique paths (cold set)
            for _ in 0..10 {
                let i = rand::random::<u64>();
                let path = format!("bucket/public/file_{}.txt", i);
                black_box(engine.can_access("anyone", "s3:GetObject", &path));
            }
        });
    });

    group.finish();
}

/// Benchmark raw segment matching
fn bench_segment_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment_matching");

    group.bench_function("whole_field_wildcard", |b| {
        b.iter(|| {
            black_box(FieldMatcher::RESOURCE.matches_pattern(
                black_box("*"),
                black_box("arn:aws:s3:::bucket/a/b/c"),
            ))
        });
    });

    group.bench_function("segment_wildcards", |b| {
        b.iter(|| {
            black_box(FieldMatcher::RESOURCE.matches_pattern(
                black_box("arn:aws:s3:::bucket/*/*/file.txt"),
                black_box("arn:aws:s3:::bucket/a/b/file.txt"),
            ))
        });
    });

    group.bench_function("segment_count_mismatch", |b| {
        b.iter(|| {
            black_box(FieldMatcher::ACTION.matches_pattern(
                black_box("s3:*"),
                black_box("s3:bucket:GetObject"),
            ))
        });
    });

    group.finish();
}

/// Benchmark policy sets of growing size
fn bench_policy_complexity(c: &mut Criterion) {
    let policy_counts = vec![5, 25, 100, 1_000];

    let mut group = c.benchmark_group("policy_complexity");

    for count in policy_counts {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let policies = (0..count)
                .map(|i| {
                    Policy::new(
                        format!("p{}", i),
                        Effect::Allow,
                        "*",
                        "read",
                        format!("path_{}/*", i),
                    )
                })
                .collect();
            let engine = engine(policies, 0);

            b.iter(|| {
                // Every policy is checked on each evaluation
                for i in 0..100 {
                    let path = format!("path_{}/file.txt", i % count);
                    black_box(engine.can_access("anyone", "read", &path));
                }
            });
        });
    }

    group.finish();
}

/// Benchmark wholesale reloads
fn bench_reload(c: &mut Criterion) {
    let mut group = c.benchmark_group("reload");

    group.bench_function("load_then_evaluate", |b| {
        let engine = engine(Vec::new(), 1024);

        b.iter(|| {
            engine.load_policies(create_complex_policies());
            black_box(engine.can_access("team:bob", "s3:PutObject", "bucket/users/bob/documents/a"));
        });
    });

    group.finish();
}

/// Benchmark deny vs allow evaluation
fn bench_deny_vs_allow(c: &mut Criterion) {
    let mut group = c.benchmark_group("deny_vs_allow");

    group.bench_function("allow_match", |b| {
        let engine = engine(
            vec![Policy::new("allow", Effect::Allow, "*", "read", "allowed/*")],
            0,
        );

        b.iter(|| {
            for i in 0..100 {
                let path = format!("allowed/file_{}.txt", i);
                black_box(engine.can_access("anyone", "read", &path));
            }
        });
    });

    group.bench_function("deny_match", |b| {
        let engine = engine(
            vec![
                Policy::new("allow", Effect::Allow, "*", "read", "*"),
                Policy::new("deny", Effect::Deny, "*", "read", "denied/*"),
            ],
            0,
        );

        b.iter(|| {
            for i in 0..100 {
                let path = format!("denied/file_{}.txt", i);
                black_box(engine.can_access("anyone", "read", &path));
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_policy_eval_cached,
    bench_policy_eval_uncached,
    bench_cache_hit_rate,
    bench_segment_matching,
    bench_policy_complexity,
    bench_reload,
    bench_deny_vs_allow,
);
criterion_main!(benches);
