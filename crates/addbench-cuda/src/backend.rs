//! CUDA implementation of the device backend.

use std::sync::Arc;

use cudarc::driver::{
    CudaContext, CudaFunction, CudaSlice, CudaStream, LaunchConfig, PushKernelArg,
};
use cudarc::nvrtc::Ptx;
use tracing::{debug, info};

use addbench_core::backend::{DeviceBackend, DeviceBuffer};
use addbench_core::error::{AddBenchError, Result};
use addbench_core::geometry::LaunchGeometry;
use addbench_core::kernel::KernelSource;

const F32_BYTES: usize = std::mem::size_of::<f32>();

/// `f32` array in device global memory.
pub struct CudaArray {
    slice: CudaSlice<f32>,
}

impl CudaArray {
    /// Underlying device slice.
    pub fn as_slice(&self) -> &CudaSlice<f32> {
        &self.slice
    }
}

impl DeviceBuffer for CudaArray {
    fn len(&self) -> usize {
        self.slice.len()
    }
}

/// Kernel loaded from NVRTC-compiled PTX.
pub struct CudaAddKernel {
    function: CudaFunction,
    entry: &'static str,
}

impl CudaAddKernel {
    /// Entry point name.
    pub fn entry(&self) -> &'static str {
        self.entry
    }
}

/// Device backend running on an NVIDIA GPU.
///
/// Copies and launches are queued on the context's default stream;
/// [`DeviceBackend::synchronize`] waits on the whole context.
pub struct CudaBackend {
    context: Arc<CudaContext>,
    stream: Arc<CudaStream>,
    ordinal: usize,
    device_name: String,
}

impl CudaBackend {
    /// Open device `ordinal`.
    pub fn new(ordinal: usize) -> Result<Self> {
        let context = CudaContext::new(ordinal).map_err(|e| {
            AddBenchError::BackendUnavailable(format!("CUDA device {}: {}", ordinal, e))
        })?;
        let device_name = context
            .name()
            .map_err(|e| AddBenchError::BackendError(format!("device name: {}", e)))?;
        let stream = context.default_stream();

        info!(ordinal, device = %device_name, "CUDA backend ready");

        Ok(Self {
            context,
            stream,
            ordinal,
            device_name,
        })
    }

    /// Device ordinal.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Name reported by the driver.
    pub fn device_name(&self) -> &str {
        &self.device_name
    }
}

fn out_of_memory(len: usize) -> AddBenchError {
    AddBenchError::OutOfMemory {
        requested: len * F32_BYTES,
    }
}

impl DeviceBackend for CudaBackend {
    type Buffer = CudaArray;
    type Kernel = CudaAddKernel;

    fn name(&self) -> &str {
        "cuda"
    }

    fn compile(&self, source: &KernelSource) -> Result<CudaAddKernel> {
        let ptx = crate::compile_ptx(source.source())?;
        debug!(entry = source.entry(), ptx_bytes = ptx.len(), "Compiled PTX");

        let module = self
            .context
            .load_module(Ptx::from_src(ptx))
            .map_err(|e| AddBenchError::BackendError(format!("module load: {}", e)))?;
        let function = module
            .load_function(source.entry())
            .map_err(|e| AddBenchError::KernelNotFound(format!("{}: {}", source.entry(), e)))?;

        Ok(CudaAddKernel {
            function,
            entry: source.entry(),
        })
    }

    fn upload(&self, host: &[f32]) -> Result<CudaArray> {
        // SAFETY: the memcpy below overwrites every element before any read.
        let mut slice = unsafe { self.stream.alloc::<f32>(host.len()) }
            .map_err(|_| out_of_memory(host.len()))?;
        self.stream
            .memcpy_htod(host, &mut slice)
            .map_err(|e| AddBenchError::TransferFailed(format!("host to device: {}", e)))?;
        Ok(CudaArray { slice })
    }

    fn alloc_zeroed(&self, len: usize) -> Result<CudaArray> {
        let slice = self
            .stream
            .alloc_zeros::<f32>(len)
            .map_err(|_| out_of_memory(len))?;
        Ok(CudaArray { slice })
    }

    fn launch_add(
        &self,
        kernel: &CudaAddKernel,
        x: &CudaArray,
        y: &CudaArray,
        z: &mut CudaArray,
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

        let size = i32::try_from(n).map_err(|_| {
            AddBenchError::LaunchFailed(format!("{} elements exceed the kernel's int range", n))
        })?;

        let config = LaunchConfig {
            grid_dim: geometry.grid_dim(),
            block_dim: geometry.block_dim(),
            shared_mem_bytes: 0,
        };

        // SAFETY: Arguments match `add_arrays(const float*, const float*, float*, int)`.
        // All three slices hold exactly `size` elements.
        unsafe {
            self.stream
                .launch_builder(&kernel.function)
                .arg(&x.slice)
                .arg(&y.slice)
                .arg(&mut z.slice)
                .arg(&size)
                .launch(config)
                .map_err(|e| AddBenchError::LaunchFailed(e.to_string()))?;
        }

        Ok(())
    }

    fn download(&self, buffer: &CudaArray) -> Result<Vec<f32>> {
        let mut host = vec![0.0f32; buffer.len()];
        self.stream
            .memcpy_dtoh(&buffer.slice, &mut host)
            .map_err(|e| AddBenchError::TransferFailed(format!("device to host: {}", e)))?;
        Ok(host)
    }

    fn synchronize(&self) -> Result<()> {
        self.context
            .synchronize()
            .map_err(|e| AddBenchError::BackendError(format!("synchronize: {}", e)))
    }
}
