#[macro_use]
extern crate criterion;

use bumpalo::Bump;
use criterion::{black_box, BatchSize, Criterion, Throughput};
use memarena_core::view::write_fixed_str;
use memarena_core::Arena;

#[allow(dead_code)]
#[derive(Default)]
struct Record {
    id: u64,
    name: [u8; 16],
    value: f64,
}

const BATCH: usize = 10_000;

/// Allocation only: arena slots vs. one heap allocation per record.
fn bench_alloc(c: &mut Criterion) {
    let mut group = c.benchmark_group("alloc");
    group.throughput(Throughput::Elements(BATCH as u64));

    group.bench_function("arena", |b| {
        let mut arena = Arena::<Record>::new(BATCH).unwrap();
        b.iter(|| {
            arena.reset();
            for _ in 0..BATCH {
                black_box(arena.alloc().unwrap());
            }
        });
    });

    group.bench_function("bumpalo", |b| {
        let mut bump = Bump::with_capacity(BATCH * std::mem::size_of::<Record>());
        b.iter(|| {
            bump.reset();
            for _ in 0..BATCH {
                black_box(bump.alloc(Record::default()));
            }
        });
    });

    group.bench_function("box", |b| {
        b.iter_batched(
            || Vec::with_capacity(BATCH),
            |mut records| {
                for _ in 0..BATCH {
                    records.push(Box::new(Record::default()));
                }
                records
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

/// Allocation plus writing every field.
fn bench_alloc_and_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("alloc_and_fill");
    group.throughput(Throughput::Elements(BATCH as u64));

    group.bench_function("arena", |b| {
        let mut arena = Arena::<Record>::new(BATCH).unwrap();
        b.iter(|| {
            arena.reset();
            for i in 0..BATCH {
                let handle = arena.alloc().unwrap();
                let record = &mut arena[handle];
                record.id = i as u64;
                write_fixed_str(&mut record.name, "testname");
                record.value = i as f64;
            }
        });
    });

    group.bench_function("box", |b| {
        b.iter_batched(
            || Vec::with_capacity(BATCH),
            |mut records| {
                for i in 0..BATCH {
                    let mut record = Box::new(Record::default());
                    record.id = i as u64;
                    write_fixed_str(&mut record.name, "testname");
                    record.value = i as f64;
                    records.push(record);
                }
                records
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_alloc, bench_alloc_and_fill);
criterion_main!(benches);
