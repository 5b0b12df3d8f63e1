//! # Confirmation Queue Benchmarks
//!
//! | Operation | Target |
//! |-----------|--------|
//! | insert into 1k pending | < 100us |
//! | remove_matching in 1k pending | < 50us |
//! | remove_leftover over 1k pending | < 200us |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use primitive_types::U256;
use rand::Rng;
use shared_types::NormalizedEvent;
use snl_01_event_normalizer::normalize_decoded;
use snl_02_confirmation_queue::ConfirmationQueue;
use snl_tests::fixtures::create;

fn event(block: u64, tx: u64) -> NormalizedEvent {
    normalize_decoded(&create(block, tx)).expect("fixture normalizes")
}

fn filled(size: u64) -> ConfirmationQueue {
    let mut rng = rand::thread_rng();
    let queue = ConfirmationQueue::new();
    for tx in 0..size {
        queue.insert(event(rng.gen_range(1_000..2_000), tx));
    }
    queue
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("snl-02-insert");
    for size in [100u64, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let queue = filled(size);
            let mut tx = size;
            b.iter(|| {
                tx += 1;
                queue.insert(black_box(event(1_500, tx)));
            })
        });
    }
    group.finish();
}

fn bench_remove_matching(c: &mut Criterion) {
    let queue = filled(1_000);
    let probe = event(1_500, 1_000_000);
    c.bench_function("snl-02-remove-matching-miss", |b| {
        b.iter(|| black_box(queue.remove_matching(&probe)))
    });
}

fn bench_remove_leftover(c: &mut Criterion) {
    c.bench_function("snl-02-remove-leftover", |b| {
        b.iter_with_setup(
            || filled(1_000),
            |queue| black_box(queue.remove_leftover(U256::from(1_510), 12)),
        )
    });
}

criterion_group!(
    benches,
    bench_insert,
    bench_remove_matching,
    bench_remove_leftover
);
criterion_main!(benches);
