//! CPU grid-emulation backend.

use parking_lot::Mutex;
use rayon::prelude::*;
use tracing::{debug, info};

use addbench_core::backend::{DeviceBackend, DeviceBuffer};
use addbench_core::error::{AddBenchError, Result};
use addbench_core::geometry::LaunchGeometry;
use addbench_core::kernel::KernelSource;

/// Entry points with a CPU implementation.
const SUPPORTED_ENTRIES: &[&str] = &["add_arrays"];

/// Host-memory buffer standing in for device memory.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuBuffer {
    data: Vec<f32>,
}

impl CpuBuffer {
    /// Buffer contents.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

impl DeviceBuffer for CpuBuffer {
    fn len(&self) -> usize {
        self.data.len()
    }
}

/// Kernel handle resolved from source by entry name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuKernel {
    entry: &'static str,
}

impl CpuKernel {
    /// Entry point this handle runs.
    pub fn entry(&self) -> &'static str {
        self.entry
    }
}

/// Accumulated launch statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaunchStats {
    /// Kernel launches dispatched.
    pub launches: u64,
    /// Threads dispatched across all launches (`grid * block`).
    pub threads_launched: u64,
    /// Threads that passed the bounds check and wrote an element.
    pub threads_active: u64,
}

impl LaunchStats {
    /// Threads that fell past the element count and did nothing.
    pub fn threads_idle(&self) -> u64 {
        self.threads_launched - self.threads_active
    }
}

/// Device backend that emulates a 1D grid launch on the CPU.
///
/// Worker groups run as rayon tasks. Each group owns one `block_size`-sized
/// chunk of the output, so no two threads can write the same element.
pub struct CpuGridBackend {
    stats: Mutex<LaunchStats>,
}

impl CpuGridBackend {
    /// Create a new CPU backend.
    pub fn new() -> Self {
        info!(
            "Initializing CPU grid backend ({} worker threads)",
            rayon::current_num_threads()
        );
        Self {
            stats: Mutex::new(LaunchStats::default()),
        }
    }

    /// Statistics accumulated over all launches so far.
    pub fn stats(&self) -> LaunchStats {
        *self.stats.lock()
    }
}

impl Default for CpuGridBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceBackend for CpuGridBackend {
    type Buffer = CpuBuffer;
    type Kernel = CpuKernel;

    fn name(&self) -> &str {
        "cpu-grid"
    }

    fn compile(&self, source: &KernelSource) -> Result<CpuKernel> {
        if !source.declares_entry() {
            return Err(AddBenchError::KernelNotFound(format!(
                "'{}' is not declared __global__ in the source",
                source.entry()
            )));
        }

        let entry = SUPPORTED_ENTRIES
            .iter()
            .copied()
            .find(|name| *name == source.entry())
            .ok_or_else(|| {
                AddBenchError::KernelNotFound(format!(
                    "no CPU implementation for '{}'",
                    source.entry()
                ))
            })?;

        debug!(entry, "Resolved CPU kernel");
        Ok(CpuKernel { entry })
    }

    fn upload(&self, host: &[f32]) -> Result<CpuBuffer> {
        Ok(CpuBuffer {
            data: host.to_vec(),
        })
    }

    fn alloc_zeroed(&self, len: usize) -> Result<CpuBuffer> {
        Ok(CpuBuffer {
            data: vec![0.0; len],
        })
    }

    fn launch_add(
        &self,
        _kernel: &CpuKernel,
        x: &CpuBuffer,
        y: &CpuBuffer,
        z: &mut CpuBuffer,
        geometry: LaunchGeometry,
    ) -> Result<()> {
        let n = geometry.element_count;
        for buffer_len in [x.len(), y.len(), z.len()] {
            if buffer_len != n {
                return Err(AddBenchError::LengthMismatch {
                    expected: n,
                    actual: buffer_len,
                });
            }
        }

        if geometry.block_size == 0 {
            return Err(AddBenchError::LaunchFailed(
                "block size must be greater than 0".to_string(),
            ));
        }

        let block = geometry.block_size as usize;
        let (x, y) = (x.as_slice(), y.as_slice());

        let active: u64 = z
            .data
            .par_chunks_mut(block)
            .enumerate()
            .map(|(block_idx, out)| {
                let mut written = 0u64;
                for thread_idx in 0..geometry.block_size {
                    let tid = geometry.global_index(block_idx as u32, thread_idx);
                    if tid < n {
                        out[thread_idx as usize] = x[tid] + y[tid];
                        written += 1;
                    }
                }
                written
            })
            .sum();

        let mut stats = self.stats.lock();
        stats.launches += 1;
        stats.threads_launched += geometry.total_threads();
        stats.threads_active += active;

        Ok(())
    }

    fn download(&self, buffer: &CpuBuffer) -> Result<Vec<f32>> {
        Ok(buffer.data.clone())
    }

    fn synchronize(&self) -> Result<()> {
        // Launches complete before returning.
        Ok(())
    }
}
