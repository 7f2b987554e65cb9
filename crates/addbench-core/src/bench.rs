//! The benchmark pipeline: generate, device path, host path, compare.

use std::time::Duration;

use tracing::{debug, info};

use crate::backend::{DeviceBackend, DeviceBuffer};
use crate::config::BenchConfig;
use crate::error::Result;
use crate::geometry::LaunchGeometry;
use crate::host;
use crate::kernel::ADD_ARRAYS_KERNEL;
use crate::report::{BenchReport, PathResult};
use crate::rng::InputArrays;
use crate::timing::{time_host, time_synchronized};

/// Device path output with its transfer timings.
#[derive(Debug, Clone)]
pub struct DeviceRun {
    /// Result copied back to the host.
    pub result: Vec<f32>,
    /// Launch through synchronization.
    pub kernel: Duration,
    /// Host-to-device copies of both inputs.
    pub upload: Duration,
    /// Device-to-host copy of the result.
    pub download: Duration,
    /// Geometry the kernel was launched with.
    pub geometry: LaunchGeometry,
}

/// One benchmark bound to a backend.
pub struct Benchmark<B: DeviceBackend> {
    config: BenchConfig,
    backend: B,
}

impl<B: DeviceBackend> Benchmark<B> {
    /// Create a benchmark; the configuration is validated here.
    pub fn new(config: BenchConfig, backend: B) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, backend })
    }

    /// Configuration in use.
    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Backend in use.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Generate inputs from the configured seed and run both paths.
    pub fn run(&self) -> Result<BenchReport> {
        let inputs = InputArrays::generate(self.config.seed, self.config.size);
        self.run_with_inputs(&inputs)
    }

    /// Run both paths on pre-generated inputs.
    pub fn run_with_inputs(&self, inputs: &InputArrays) -> Result<BenchReport> {
        let device = self.run_device(inputs)?;
        let host = self.run_host(inputs)?;

        info!(
            backend = self.backend.name(),
            device_ms = device.kernel.as_secs_f64() * 1000.0,
            host_ms = host.elapsed_ms(),
            "Benchmark complete"
        );

        Ok(BenchReport {
            backend: self.backend.name().to_string(),
            geometry: device.geometry,
            device: PathResult {
                result: device.result,
                elapsed: device.kernel,
            },
            host,
            upload: device.upload,
            download: device.download,
            preview_len: self.config.preview_len,
        })
    }

    /// Run the device path.
    ///
    /// Only the launch and its synchronization are inside the timed span.
    pub fn run_device(&self, inputs: &InputArrays) -> Result<DeviceRun> {
        let backend = &self.backend;
        let geometry = LaunchGeometry::for_elements(inputs.len(), self.config.block_size);

        let kernel = backend.compile(&ADD_ARRAYS_KERNEL)?;
        debug!(
            backend = backend.name(),
            entry = ADD_ARRAYS_KERNEL.entry(),
            "Kernel compiled"
        );

        if geometry.is_empty() {
            // A zero-block grid is not a valid launch.
            debug!("No elements; skipping device launch");
            return Ok(DeviceRun {
                result: Vec::new(),
                kernel: Duration::ZERO,
                upload: Duration::ZERO,
                download: Duration::ZERO,
                geometry,
            });
        }

        let upload = time_synchronized(backend, || {
            Ok((backend.upload(inputs.x())?, backend.upload(inputs.y())?))
        })?;
        let ((x, y), upload_elapsed) = upload.into_parts();
        let mut z = backend.alloc_zeroed(inputs.len())?;
        debug!(
            bytes = x.size_bytes() + y.size_bytes(),
            elapsed_ms = upload_elapsed.as_secs_f64() * 1000.0,
            "Inputs uploaded"
        );

        let launch = time_synchronized(backend, || {
            backend.launch_add(&kernel, &x, &y, &mut z, geometry)
        })?;
        debug!(
            grid = geometry.grid_size,
            block = geometry.block_size,
            idle_threads = geometry.idle_threads(),
            elapsed_ms = launch.elapsed_ms(),
            "Kernel finished"
        );

        let (result, download_elapsed) = time_host(|| backend.download(&z)).into_parts();
        let result = result?;
        debug!(
            elapsed_ms = download_elapsed.as_secs_f64() * 1000.0,
            "Result downloaded"
        );

        Ok(DeviceRun {
            result,
            kernel: launch.elapsed,
            upload: upload_elapsed,
            download: download_elapsed,
            geometry,
        })
    }

    /// Run the host path.
    pub fn run_host(&self, inputs: &InputArrays) -> Result<PathResult> {
        let timed = time_host(|| host::add_arrays(inputs.x(), inputs.y()));
        let (result, elapsed) = timed.into_parts();
        let result = result?;
        debug!(
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "Host add finished"
        );
        Ok(PathResult { result, elapsed })
    }
}
