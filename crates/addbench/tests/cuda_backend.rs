//! CUDA backend integration tests.
//!
//! These tests require CUDA hardware. They are not marked #[ignore]; on
//! systems without a device the skip_without_cuda! macro returns early.
//!
//! Run with: cargo test --features cuda -p addbench --test cuda_backend

#![cfg(feature = "cuda")]

use addbench::cuda::cuda_device_count;
use addbench::prelude::*;

const TOLERANCE: f32 = 1e-6;

/// Helper macro to skip tests when CUDA is not available.
macro_rules! skip_without_cuda {
    () => {
        if !is_cuda_available() {
            eprintln!("Skipping test: CUDA not available");
            return;
        }
    };
}

fn cuda_bench(size: usize, block_size: u32, seed: u64) -> Benchmark<CudaBackend> {
    let config = BenchConfig::builder()
        .with_size(size)
        .with_block_size(block_size)
        .with_seed(seed)
        .build()
        .expect("valid config");
    let backend = CudaBackend::new(0).expect("Failed to open CUDA device 0");
    Benchmark::new(config, backend).expect("benchmark")
}

#[test]
fn test_cuda_availability_detection() {
    let available = is_cuda_available();
    let count = cuda_device_count();

    println!("CUDA available: {}", available);
    println!("CUDA device count: {}", count);

    assert_eq!(available, count > 0);
}

#[test]
fn test_cuda_device_open() {
    skip_without_cuda!();

    let backend = CudaBackend::new(0).expect("Failed to open CUDA device 0");
    println!("Device 0: {}", backend.device_name());
    assert!(!backend.device_name().is_empty());
    assert_eq!(backend.ordinal(), 0);
    assert_eq!(backend.name(), "cuda");
}

#[test]
fn test_cuda_compile_add_kernel() {
    skip_without_cuda!();

    let backend = CudaBackend::new(0).unwrap();
    let kernel = backend.compile(&ADD_ARRAYS_KERNEL).unwrap();
    assert_eq!(kernel.entry(), "add_arrays");
}

#[test]
fn test_cuda_compile_missing_entry() {
    skip_without_cuda!();

    let backend = CudaBackend::new(0).unwrap();
    let source = KernelSource::new("not_there", ADD_ARRAYS_KERNEL.source());
    assert!(matches!(
        backend.compile(&source),
        Err(AddBenchError::KernelNotFound(_))
    ));
}

#[test]
fn test_cuda_small_single_group() {
    skip_without_cuda!();

    let inputs = InputArrays::generate(0, 16);
    let report = cuda_bench(16, 256, 0).run_with_inputs(&inputs).unwrap();

    for i in 0..16 {
        let expected = inputs.x()[i] + inputs.y()[i];
        assert!((report.device.result[i] - expected).abs() < TOLERANCE);
    }
    assert!(report.results_match(TOLERANCE));
}

#[test]
fn test_cuda_partial_final_group() {
    skip_without_cuda!();

    let report = cuda_bench(1_000_003, 256, 7).run().unwrap();
    assert_eq!(report.device.result.len(), 1_000_003);
    assert!(
        report.results_match(TOLERANCE),
        "max diff {}",
        report.max_abs_diff()
    );
}

#[test]
fn test_cuda_empty_arrays() {
    skip_without_cuda!();

    let report = cuda_bench(0, 256, 0).run().unwrap();
    assert!(report.device.result.is_empty());
    assert!(report.host.result.is_empty());
}

#[test]
fn test_cuda_timings() {
    skip_without_cuda!();

    let report = cuda_bench(1 << 22, 256, 0).run().unwrap();
    assert!(report.device.elapsed_ms() >= 0.0);
    assert!(report.host.elapsed_ms() >= 0.0);
    if !report.device.elapsed.is_zero() {
        assert!(report.speedup() > 0.0);
    }
    println!("{report}");
}
