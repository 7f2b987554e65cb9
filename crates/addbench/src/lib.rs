//! # addbench
//!
//! Benchmarks elementwise addition of two large `f32` arrays: a CUDA kernel
//! on the GPU against a vectorized routine on the host, reporting the
//! speedup ratio.
//!
//! ## Quick Start
//!
//! ```ignore
//! use addbench::prelude::*;
//!
//! let config = BenchConfig::builder().with_size(1 << 20).build()?;
//! let report = Benchmark::new(config, CpuGridBackend::new())?.run()?;
//! print!("{report}");
//! ```
//!
//! ## Backends
//!
//! - **CPU grid** - emulates the grid/block launch on the CPU (always available)
//! - **CUDA** - NVIDIA GPUs (requires `cuda` feature)
//!
//! ```toml
//! [dependencies]
//! addbench = { version = "0.1", features = ["cuda"] }
//! ```
//!
//! ## Pipeline
//!
//! ```text
//!  seed ──► InputArrays (x, y) ──┬──► upload ─► launch + sync ─► download ─► device result
//!                                └──► host add ───────────────────────────► host result
//!                                                                              │
//!                        BenchReport: previews, elapsed times, speedup ◄──────┘
//! ```

#![warn(missing_docs)]

pub use addbench_core::*;

/// CPU grid-emulation backend.
pub mod cpu {
    pub use addbench_cpu::*;
}

/// CUDA backend.
pub mod cuda {
    pub use addbench_cuda::*;
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use addbench_core::prelude::*;
    pub use addbench_cpu::CpuGridBackend;
    pub use addbench_cuda::{is_cuda_available, CudaBackend};
}
