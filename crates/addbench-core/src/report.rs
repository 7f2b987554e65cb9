//! Benchmark results and the human-readable report.

use std::fmt;
use std::time::Duration;

use crate::geometry::LaunchGeometry;

/// Result buffer and elapsed time of one path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    /// Computed sums.
    pub result: Vec<f32>,
    /// Measured wall-clock time.
    pub elapsed: Duration,
}

impl PathResult {
    /// Elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Outcome of one benchmark run.
#[derive(Debug, Clone)]
pub struct BenchReport {
    /// Backend the device path ran on.
    pub backend: String,
    /// Launch geometry used by the device path.
    pub geometry: LaunchGeometry,
    /// Device result; `elapsed` spans launch through synchronization.
    pub device: PathResult,
    /// Host result.
    pub host: PathResult,
    /// Host-to-device copy time for both inputs.
    pub upload: Duration,
    /// Device-to-host copy time for the result.
    pub download: Duration,
    /// Leading elements shown per result.
    pub preview_len: usize,
}

impl BenchReport {
    /// `host_time / device_time`.
    ///
    /// Not guarded: a zero device time yields `inf` (or `NaN` if both are zero).
    pub fn speedup(&self) -> f64 {
        self.host.elapsed.as_secs_f64() / self.device.elapsed.as_secs_f64()
    }

    /// Largest absolute difference between device and host results.
    ///
    /// Returns `f32::INFINITY` if the results differ in length.
    pub fn max_abs_diff(&self) -> f32 {
        if self.device.result.len() != self.host.result.len() {
            return f32::INFINITY;
        }
        self.device
            .result
            .iter()
            .zip(&self.host.result)
            .map(|(d, h)| (d - h).abs())
            .fold(0.0f32, f32::max)
    }

    /// Whether both paths agree within `tolerance`.
    pub fn results_match(&self, tolerance: f32) -> bool {
        self.max_abs_diff() < tolerance
    }
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", Preview::new(&self.device.result, self.preview_len))?;
        writeln!(f, "Elapsed time: {}ms", self.device.elapsed_ms())?;
        writeln!(f, "{}", Preview::new(&self.host.result, self.preview_len))?;
        writeln!(f, "Elapsed time: {}ms", self.host.elapsed_ms())?;
        writeln!(f, "Speedup: {}", self.speedup())
    }
}

/// Leading elements of a buffer, printed as `[a b c]`.
#[derive(Debug, Clone, Copy)]
pub struct Preview<'a> {
    values: &'a [f32],
}

impl<'a> Preview<'a> {
    /// Preview at most `len` leading elements of `values`.
    pub fn new(values: &'a [f32], len: usize) -> Self {
        Self {
            values: &values[..len.min(values.len())],
        }
    }
}

impl fmt::Display for Preview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str("]")
    }
}
