use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

use lettercrack::cancel::{CancelToken, LengthTimer};
use lettercrack::enumerator::{Candidates, CombinationEnumerator};
use lettercrack::{Alphabet, ParallelRunner, SearchConfig, SearchState, SequentialRunner};

fn bench_enumerate_length3_full(c: &mut Criterion) {
    // 17,576 candidates, target unreachable at this length
    let alphabet = Alphabet::uppercase();
    c.bench_function("enumerate(len=3, full space)", |b| {
        b.iter(|| {
            let state = SearchState::new(8);
            state.start();
            let stop = CancelToken::new();
            CombinationEnumerator::new(&alphabet, black_box("ZZZZ"), &state, &stop).search_length(3)
        });
    });
}

fn bench_enumerate_with_length_timer(c: &mut Criterion) {
    // Same space, but paying for a clock read at every checkpoint
    let alphabet = Alphabet::uppercase();
    c.bench_function("enumerate(len=3, LengthTimer)", |b| {
        b.iter(|| {
            let state = SearchState::new(8);
            state.start();
            let stop = LengthTimer::start(Duration::from_secs(3600));
            CombinationEnumerator::new(&alphabet, black_box("ZZZZ"), &state, &stop).search_length(3)
        });
    });
}

fn bench_candidates_iterator(c: &mut Criterion) {
    let alphabet = Alphabet::uppercase();
    c.bench_function("Candidates(len=3).count()", |b| {
        b.iter(|| Candidates::new(black_box(&alphabet), 3).count());
    });
}

fn bench_sequential_cab(c: &mut Criterion) {
    let config = SearchConfig::default().with_budget(Duration::from_secs(10));
    c.bench_function("sequential(CAB)", |b| {
        b.iter(|| SequentialRunner::new(&config).run(black_box("CAB")));
    });
}

fn bench_parallel_cab(c: &mut Criterion) {
    let config = SearchConfig::default().with_budget(Duration::from_secs(10));
    c.bench_function("parallel(CAB)", |b| {
        b.iter(|| ParallelRunner::new(&config).run(black_box("CAB")));
    });
}

criterion_group!(
    benches,
    bench_enumerate_length3_full,
    bench_enumerate_with_length_timer,
    bench_candidates_iterator,
    bench_sequential_cab,
    bench_parallel_cab,
);
criterion_main!(benches);
