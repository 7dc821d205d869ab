use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use siftkit::edit_distance;

fn bench_edit_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("edit_distance");
    for len in [8usize, 64, 512] {
        let a = "algorithm".repeat(len / 8 + 1);
        let b = "altruistic".repeat(len / 8 + 1);
        group.bench_with_input(BenchmarkId::from_parameter(len), &(a, b), |bench, (a, b)| {
            bench.iter(|| edit_distance(black_box(a), black_box(b)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_edit_distance);
criterion_main!(benches);
