use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use flakeid::{
    AtomicSnowflakeGenerator, LockSnowflakeGenerator, MonotonicClock, SnowflakeGenerator,
    SnowflakeId, TimeSource,
};
use std::{
    sync::{
        Barrier,
        atomic::{AtomicI64, Ordering},
    },
    thread::scope,
    time::{Duration, Instant},
};

/// Advances one millisecond every 4096 reads, so the hot path never has to
/// wait on the sequence.
struct FastMockTime {
    reads: AtomicI64,
}

impl TimeSource for FastMockTime {
    fn current_millis(&self) -> i64 {
        flakeid::DEFAULT_EPOCH + self.reads.fetch_add(1, Ordering::Relaxed) / 4096
    }
}

fn fast_time() -> FastMockTime {
    FastMockTime {
        reads: AtomicI64::new(0),
    }
}

// Number of IDs generated per benchmark iteration (per thread for
// multi-threaded runs).
const TOTAL_IDS: usize = 4096;

/// Benchmarks a single caller generating IDs back to back.
fn bench_generator<G, T>(c: &mut Criterion, group_name: &str, generator_factory: impl Fn() -> G)
where
    G: SnowflakeGenerator<SnowflakeId, T>,
    T: TimeSource,
{
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let mut elapsed = Duration::ZERO;
            for _ in 0..iters {
                let generator = generator_factory();
                let start = Instant::now();
                for _ in 0..TOTAL_IDS {
                    black_box(generator.next_id().unwrap());
                }
                elapsed += start.elapsed();
            }
            elapsed
        });
    });

    group.finish();
}

/// Benchmarks one shared generator under contention from several threads.
fn bench_generator_threaded<G, T>(
    c: &mut Criterion,
    group_name: &str,
    generator_factory: impl Fn() -> G,
) where
    G: SnowflakeGenerator<SnowflakeId, T> + Sync,
    T: TimeSource,
{
    let mut group = c.benchmark_group(group_name);

    for threads in [2, 4, 8] {
        group.throughput(Throughput::Elements((TOTAL_IDS * threads) as u64));
        group.bench_function(format!("threads/{threads}/elems/{TOTAL_IDS}"), |b| {
            b.iter_custom(|iters| {
                let mut elapsed = Duration::ZERO;
                for _ in 0..iters {
                    let generator = generator_factory();
                    let barrier = Barrier::new(threads + 1);
                    let start = scope(|s| {
                        for _ in 0..threads {
                            s.spawn(|| {
                                barrier.wait();
                                for _ in 0..TOTAL_IDS {
                                    black_box(generator.next_id().unwrap());
                                }
                            });
                        }
                        barrier.wait();
                        Instant::now()
                    });
                    elapsed += start.elapsed();
                }
                elapsed
            });
        });
    }

    group.finish();
}

fn benchmarks(c: &mut Criterion) {
    bench_generator(c, "lock/mock", || {
        LockSnowflakeGenerator::<SnowflakeId, _>::new(0, 0, None, fast_time()).unwrap()
    });
    bench_generator(c, "atomic/mock", || {
        AtomicSnowflakeGenerator::<SnowflakeId, _>::new(0, 0, None, fast_time()).unwrap()
    });

    let clock = MonotonicClock::new();
    bench_generator(c, "lock/monotonic", || {
        LockSnowflakeGenerator::<SnowflakeId, _>::new(0, 0, None, clock.clone()).unwrap()
    });
    bench_generator(c, "atomic/monotonic", || {
        AtomicSnowflakeGenerator::<SnowflakeId, _>::new(0, 0, None, clock.clone()).unwrap()
    });

    bench_generator_threaded(c, "lock/threaded", || {
        LockSnowflakeGenerator::<SnowflakeId, _>::new(0, 0, None, fast_time()).unwrap()
    });
    bench_generator_threaded(c, "atomic/threaded", || {
        AtomicSnowflakeGenerator::<SnowflakeId, _>::new(0, 0, None, fast_time()).unwrap()
    });
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
