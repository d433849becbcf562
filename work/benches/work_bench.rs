use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use nanokit_work::{do_work, get_work_value, validate_work, WorkGenerator};

fn bench_work_value(c: &mut Criterion) {
    let root = [0x42u8; 32];
    let mut group = c.benchmark_group("work_value");
    group.throughput(Throughput::Elements(1));
    group.bench_function("get_work_value", |b| {
        let mut nonce = 0u64;
        b.iter(|| {
            nonce = nonce.wrapping_add(1);
            black_box(get_work_value(black_box(&root), nonce))
        });
    });
    group.finish();
}

fn bench_validation(c: &mut Criterion) {
    let root = [0x42u8; 32];
    c.bench_function("validate_work", |b| {
        b.iter(|| {
            black_box(validate_work(
                black_box(&root),
                black_box(0xE735),
                black_box(0xFFFF_0000_0000_0000),
            ))
        });
    });
}

fn bench_search(c: &mut Criterion) {
    let root = [0x42u8; 32];
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    // Low thresholds that complete quickly enough for benchmarking; each
    // factor-of-16 step multiplies the expected hash count by 16.
    for shift in [56u32, 58, 60] {
        let threshold = 1u64 << shift;
        group.bench_with_input(
            BenchmarkId::new("do_work", format!("2^{shift}")),
            &threshold,
            |b, &threshold| {
                b.iter(|| black_box(do_work(black_box(&root), 0, threshold)));
            },
        );
    }

    let generator = WorkGenerator::from_pool();
    group.bench_function("generate_parallel_2^60", |b| {
        b.iter(|| black_box(generator.generate(black_box(&root), 1u64 << 60).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_work_value, bench_validation, bench_search);
criterion_main!(benches);
