//! Device backend abstraction.
//!
//! A backend is the opaque accelerator capability the benchmark needs:
//! compile source into a kernel handle, allocate device buffers, copy
//! host↔device, launch with a given geometry, and synchronize.

use crate::error::Result;
use crate::geometry::LaunchGeometry;
use crate::kernel::KernelSource;

/// A buffer of `f32` resident in a backend's memory space.
pub trait DeviceBuffer {
    /// Number of elements.
    fn len(&self) -> usize;

    /// Whether the buffer holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size in bytes.
    fn size_bytes(&self) -> usize {
        self.len() * std::mem::size_of::<f32>()
    }
}

/// Accelerator operations used by the device path.
///
/// Launches may be asynchronous. Work is only guaranteed complete after
/// [`synchronize`](DeviceBackend::synchronize) returns.
pub trait DeviceBackend {
    /// Device-resident buffer type.
    type Buffer: DeviceBuffer;
    /// Compiled, callable kernel handle.
    type Kernel;

    /// Human-readable backend name.
    fn name(&self) -> &str;

    /// Compile kernel source into a callable handle.
    fn compile(&self, source: &KernelSource) -> Result<Self::Kernel>;

    /// Allocate a buffer and copy `host` into it.
    fn upload(&self, host: &[f32]) -> Result<Self::Buffer>;

    /// Allocate a zero-filled buffer of `len` elements.
    fn alloc_zeroed(&self, len: usize) -> Result<Self::Buffer>;

    /// Launch the elementwise-add kernel: `z[tid] = x[tid] + y[tid]` for
    /// every `tid < geometry.element_count`.
    fn launch_add(
        &self,
        kernel: &Self::Kernel,
        x: &Self::Buffer,
        y: &Self::Buffer,
        z: &mut Self::Buffer,
        geometry: LaunchGeometry,
    ) -> Result<()>;

    /// Copy a buffer back to host memory.
    fn download(&self, buffer: &Self::Buffer) -> Result<Vec<f32>>;

    /// Block until all previously submitted work has completed.
    fn synchronize(&self) -> Result<()>;
}
