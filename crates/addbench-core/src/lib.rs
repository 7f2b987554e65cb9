//! # addbench core
//!
//! Core types for benchmarking elementwise `f32` addition on an accelerator
//! against a vectorized host routine.
//!
//! ## Core Abstractions
//!
//! - [`BenchConfig`] - Array size, block size and seed for one run
//! - [`LaunchGeometry`] - 1D grid/block shape derived from the element count
//! - [`DeviceBackend`] - Compile, allocate, copy, launch and synchronize
//! - [`InputArrays`] - Deterministic Philox-generated inputs
//! - [`Benchmark`] - The generate / device / host / compare pipeline
//! - [`BenchReport`] - Results, timings and the speedup ratio
//!
//! ## Example
//!
//! ```ignore
//! use addbench_core::prelude::*;
//! use addbench_cpu::CpuGridBackend;
//!
//! let config = BenchConfig::builder().with_size(16).build()?;
//! let report = Benchmark::new(config, CpuGridBackend::new())?.run()?;
//! print!("{report}");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod bench;
pub mod config;
pub mod error;
pub mod geometry;
pub mod host;
pub mod kernel;
pub mod report;
pub mod rng;
pub mod timing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::backend::{DeviceBackend, DeviceBuffer};
    pub use crate::bench::{Benchmark, DeviceRun};
    pub use crate::config::{BenchConfig, BenchConfigBuilder};
    pub use crate::error::{AddBenchError, Result};
    pub use crate::geometry::LaunchGeometry;
    pub use crate::host::add_arrays;
    pub use crate::kernel::{KernelSource, ADD_ARRAYS_KERNEL};
    pub use crate::report::{BenchReport, PathResult};
    pub use crate::rng::{InputArrays, PhiloxRng, PhiloxState};
    pub use crate::timing::{time_host, time_synchronized, Timed};
}

pub use backend::{DeviceBackend, DeviceBuffer};
pub use bench::Benchmark;
pub use config::BenchConfig;
pub use error::{AddBenchError, Result};
pub use geometry::LaunchGeometry;
pub use report::BenchReport;
