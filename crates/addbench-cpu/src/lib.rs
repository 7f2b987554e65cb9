//! CPU Backend for addbench
//!
//! Executes kernels on the CPU with the same grid/block semantics as a GPU
//! launch: `grid_size` worker groups of `block_size` threads, each thread
//! deriving `tid = block_idx * block_size + thread_idx` and doing nothing
//! when `tid` falls past the element count.
//!
//! Used for testing and as a fallback when no GPU is available.

#![warn(missing_docs)]

mod runtime;

pub use runtime::{CpuBuffer, CpuGridBackend, CpuKernel, LaunchStats};
