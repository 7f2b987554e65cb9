//! Error types for the benchmark pipeline.

use thiserror::Error;

/// Result type alias using [`AddBenchError`].
pub type Result<T> = std::result::Result<T, AddBenchError>;

/// Errors raised while preparing or running a benchmark.
///
/// None of these are recovered from; `main` reports them and exits non-zero.
#[derive(Error, Debug)]
pub enum AddBenchError {
    /// Backend not available (feature disabled or no device present).
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Generic driver-level failure.
    #[error("backend error: {0}")]
    BackendError(String),

    /// Kernel source failed to compile.
    #[error("kernel compilation failed: {0}")]
    CompilationError(String),

    /// Entry point not present in the compiled source.
    #[error("kernel not found: {0}")]
    KernelNotFound(String),

    /// Device allocation failed.
    #[error("out of device memory: requested {requested} bytes")]
    OutOfMemory {
        /// Requested size in bytes.
        requested: usize,
    },

    /// Host/device copy failed.
    #[error("transfer failed: {0}")]
    TransferFailed(String),

    /// Kernel launch failed.
    #[error("kernel launch failed: {0}")]
    LaunchFailed(String),

    /// Sibling buffers differ in length.
    #[error("length mismatch: expected {expected} elements, got {actual}")]
    LengthMismatch {
        /// Expected element count.
        expected: usize,
        /// Actual element count.
        actual: usize,
    },

    /// Configuration rejected by validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AddBenchError {
    /// Returns true if this error means no accelerator could be used at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, AddBenchError::BackendUnavailable(_))
    }
}
