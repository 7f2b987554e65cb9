//! CUDA Backend for addbench
//!
//! NVIDIA GPU support through cudarc: NVRTC compilation of kernel source,
//! device allocation, host↔device copies, 1D grid launches and
//! synchronization.
//!
//! # Requirements
//!
//! - `cuda` feature enabled
//! - NVIDIA driver and NVRTC available at runtime (loaded dynamically)
//!
//! # Example
//!
//! ```ignore
//! use addbench_core::prelude::*;
//! use addbench_cuda::CudaBackend;
//!
//! let backend = CudaBackend::new(0)?;
//! let report = Benchmark::new(BenchConfig::default(), backend)?.run()?;
//! print!("{report}");
//! ```

#![warn(missing_docs)]

#[cfg(feature = "cuda")]
mod backend;

#[cfg(feature = "cuda")]
pub use backend::{CudaAddKernel, CudaArray, CudaBackend};

// Placeholder implementation when CUDA is not available
#[cfg(not(feature = "cuda"))]
mod stub {
    use addbench_core::backend::{DeviceBackend, DeviceBuffer};
    use addbench_core::error::{AddBenchError, Result};
    use addbench_core::geometry::LaunchGeometry;
    use addbench_core::kernel::KernelSource;

    fn unavailable<T>() -> Result<T> {
        Err(AddBenchError::BackendUnavailable(
            "CUDA feature not enabled".to_string(),
        ))
    }

    /// Stub CUDA backend when the CUDA feature is disabled.
    pub struct CudaBackend {
        _private: (),
    }

    impl CudaBackend {
        /// Create fails when CUDA is not available.
        pub fn new(_ordinal: usize) -> Result<Self> {
            unavailable()
        }
    }

    /// Stub device buffer.
    pub struct CudaArray {
        _private: (),
    }

    impl DeviceBuffer for CudaArray {
        fn len(&self) -> usize {
            0
        }
    }

    impl DeviceBackend for CudaBackend {
        type Buffer = CudaArray;
        type Kernel = ();

        fn name(&self) -> &str {
            "cuda"
        }

        fn compile(&self, _source: &KernelSource) -> Result<()> {
            unavailable()
        }

        fn upload(&self, _host: &[f32]) -> Result<CudaArray> {
            unavailable()
        }

        fn alloc_zeroed(&self, _len: usize) -> Result<CudaArray> {
            unavailable()
        }

        fn launch_add(
            &self,
            _kernel: &(),
            _x: &CudaArray,
            _y: &CudaArray,
            _z: &mut CudaArray,
            _geometry: LaunchGeometry,
        ) -> Result<()> {
            unavailable()
        }

        fn download(&self, _buffer: &CudaArray) -> Result<Vec<f32>> {
            unavailable()
        }

        fn synchronize(&self) -> Result<()> {
            unavailable()
        }
    }
}

#[cfg(not(feature = "cuda"))]
pub use stub::{CudaArray, CudaBackend};

/// Check if CUDA is available at runtime.
///
/// Returns false if the `cuda` feature is disabled, the driver library is
/// missing, or no device is present.
pub fn is_cuda_available() -> bool {
    cuda_device_count() > 0
}

/// Get CUDA device count.
///
/// Returns 0 if CUDA is not available or libraries are not installed.
pub fn cuda_device_count() -> usize {
    #[cfg(feature = "cuda")]
    {
        // cudarc panics if the CUDA libraries cannot be loaded
        std::panic::catch_unwind(|| {
            cudarc::driver::CudaContext::device_count().unwrap_or(0) as usize
        })
        .unwrap_or(0)
    }
    #[cfg(not(feature = "cuda"))]
    {
        0
    }
}

/// Compile CUDA C source code to PTX using NVRTC.
#[cfg(feature = "cuda")]
pub fn compile_ptx(cuda_source: &str) -> addbench_core::error::Result<String> {
    let ptx = cudarc::nvrtc::compile_ptx(cuda_source).map_err(|e| {
        addbench_core::error::AddBenchError::CompilationError(format!(
            "NVRTC compilation failed: {}",
            e
        ))
    })?;

    Ok(ptx.to_src().to_string())
}

/// Stub compile_ptx when CUDA is not available.
#[cfg(not(feature = "cuda"))]
pub fn compile_ptx(_cuda_source: &str) -> addbench_core::error::Result<String> {
    Err(addbench_core::error::AddBenchError::BackendUnavailable(
        "CUDA feature not enabled".to_string(),
    ))
}
