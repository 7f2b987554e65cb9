//! Benchmark configuration.
//!
//! Array size, block size and seed are carried explicitly so the same
//! pipeline runs at full scale from the binary and at tiny scale in tests.
//!
//! ```ignore
//! use addbench_core::config::BenchConfig;
//!
//! let config = BenchConfig::builder()
//!     .with_size(1 << 20)
//!     .with_block_size(128)
//!     .with_seed(7)
//!     .build()?;
//! ```

use crate::error::{AddBenchError, Result};
use crate::geometry::LaunchGeometry;

/// Default element count (1e8).
pub const DEFAULT_SIZE: usize = 100_000_000;
/// Default threads per worker group.
pub const DEFAULT_BLOCK_SIZE: u32 = 256;
/// Default generator seed.
pub const DEFAULT_SEED: u64 = 0;
/// Default number of leading elements printed per result.
pub const DEFAULT_PREVIEW_LEN: usize = 10;
/// Upper bound on threads per block for every supported device.
pub const MAX_BLOCK_SIZE: u32 = 1024;

/// Configuration for one benchmark run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    /// Number of elements in each array.
    pub size: usize,
    /// Threads per worker group.
    pub block_size: u32,
    /// Seed for the input generator.
    pub seed: u64,
    /// Leading elements shown in the report.
    pub preview_len: usize,
    /// Accelerator ordinal to run the device path on.
    pub device_ordinal: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            block_size: DEFAULT_BLOCK_SIZE,
            seed: DEFAULT_SEED,
            preview_len: DEFAULT_PREVIEW_LEN,
            device_ordinal: 0,
        }
    }
}

impl BenchConfig {
    /// Create a builder starting from the defaults.
    pub fn builder() -> BenchConfigBuilder {
        BenchConfigBuilder::new()
    }

    /// Validate the configuration.
    ///
    /// `size == 0` is accepted; both paths then produce empty results.
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(AddBenchError::InvalidConfig(
                "block size must be greater than 0".to_string(),
            ));
        }

        if self.block_size > MAX_BLOCK_SIZE {
            return Err(AddBenchError::InvalidConfig(format!(
                "block size {} exceeds the device limit of {}",
                self.block_size, MAX_BLOCK_SIZE
            )));
        }

        // The kernel takes the element count as a signed 32-bit int.
        if self.size > i32::MAX as usize {
            return Err(AddBenchError::InvalidConfig(format!(
                "size {} does not fit the kernel's int argument",
                self.size
            )));
        }

        if self.preview_len == 0 {
            return Err(AddBenchError::InvalidConfig(
                "preview length must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Launch geometry for this configuration.
    pub fn geometry(&self) -> LaunchGeometry {
        LaunchGeometry::for_elements(self.size, self.block_size)
    }

    /// Bytes held by one array of this size.
    pub fn bytes_per_array(&self) -> usize {
        self.size * std::mem::size_of::<f32>()
    }
}

/// Builder for [`BenchConfig`].
#[derive(Debug, Clone, Default)]
pub struct BenchConfigBuilder {
    config: BenchConfig,
}

impl BenchConfigBuilder {
    /// Create a builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the element count.
    #[must_use]
    pub fn with_size(mut self, size: usize) -> Self {
        self.config.size = size;
        self
    }

    /// Set threads per worker group.
    #[must_use]
    pub fn with_block_size(mut self, block_size: u32) -> Self {
        self.config.block_size = block_size;
        self
    }

    /// Set the generator seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set how many leading elements the report shows.
    #[must_use]
    pub fn with_preview_len(mut self, preview_len: usize) -> Self {
        self.config.preview_len = preview_len;
        self
    }

    /// Set the accelerator ordinal.
    #[must_use]
    pub fn with_device_ordinal(mut self, ordinal: usize) -> Self {
        self.config.device_ordinal = ordinal;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<BenchConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_run() {
        let config = BenchConfig::default();
        assert_eq!(config.size, 100_000_000);
        assert_eq!(config.block_size, 256);
        assert_eq!(config.seed, 0);
        assert_eq!(config.preview_len, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = BenchConfig::builder()
            .with_size(16)
            .with_block_size(32)
            .with_seed(9)
            .with_preview_len(4)
            .build()
            .unwrap();

        assert_eq!(config.size, 16);
        assert_eq!(config.block_size, 32);
        assert_eq!(config.seed, 9);
        assert_eq!(config.preview_len, 4);
        assert_eq!(config.bytes_per_array(), 64);
    }

    #[test]
    fn test_zero_size_is_valid() {
        assert!(BenchConfig::builder().with_size(0).build().is_ok());
    }

    #[test]
    fn test_rejects_bad_block_size() {
        let err = BenchConfig::builder().with_block_size(0).build().unwrap_err();
        assert!(matches!(err, AddBenchError::InvalidConfig(_)));

        let err = BenchConfig::builder()
            .with_block_size(2048)
            .build()
            .unwrap_err();
        assert!(matches!(err, AddBenchError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_oversized_arrays() {
        let err = BenchConfig::builder()
            .with_size(i32::MAX as usize + 1)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("int argument"));
    }

    #[test]
    fn test_geometry_from_config() {
        let config = BenchConfig::builder().with_size(1000).build().unwrap();
        let geometry = config.geometry();
        assert_eq!(geometry.grid_size, 4);
        assert_eq!(geometry.block_size, 256);
    }
}
