//! Elementwise-add benchmarks.
//!
//! Measures:
//! - Host lane-chunked add
//! - Emulated grid launch on the CPU backend
//! - Philox input generation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use addbench::host::add_arrays_into;
use addbench::prelude::*;

const SIZES: [usize; 3] = [1 << 12, 1 << 16, 1 << 20];

fn bench_host_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("vector_add/host");

    for size in SIZES {
        let inputs = InputArrays::generate(0, size);
        let mut z = vec![0.0f32; size];
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                add_arrays_into(black_box(inputs.x()), black_box(inputs.y()), &mut z).unwrap();
                black_box(&z);
            });
        });
    }

    group.finish();
}

fn bench_cpu_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("vector_add/cpu_grid");
    let backend = CpuGridBackend::new();
    let kernel = backend.compile(&ADD_ARRAYS_KERNEL).unwrap();

    for size in SIZES {
        let inputs = InputArrays::generate(0, size);
        let x = backend.upload(inputs.x()).unwrap();
        let y = backend.upload(inputs.y()).unwrap();
        let mut z = backend.alloc_zeroed(size).unwrap();
        group.throughput(Throughput::Elements(size as u64));

        for block in [128u32, 256] {
            let geometry = LaunchGeometry::for_elements(size, block);
            group.bench_with_input(
                BenchmarkId::new(format!("block_{}", block), size),
                &geometry,
                |b, &geometry| {
                    b.iter(|| {
                        backend
                            .launch_add(&kernel, &x, &y, &mut z, geometry)
                            .unwrap();
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_input_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("vector_add/generate");

    for size in SIZES {
        group.throughput(Throughput::Elements(2 * size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| black_box(InputArrays::generate(0, size)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_host_add, bench_cpu_grid, bench_input_generation);
criterion_main!(benches);
