//! 1D launch geometry.

/// Grid/block shape for a one-dimensional elementwise launch.
///
/// `grid_size = ceil(element_count / block_size)`, so
/// `total_threads() >= element_count` and at most `block_size - 1` threads
/// of the final group are idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchGeometry {
    /// Number of worker groups.
    pub grid_size: u32,
    /// Threads per worker group.
    pub block_size: u32,
    /// Elements covered by the launch.
    pub element_count: usize,
}

impl LaunchGeometry {
    /// Compute the geometry covering `element_count` elements.
    ///
    /// `block_size` must be non-zero; [`BenchConfig::validate`] enforces this.
    ///
    /// [`BenchConfig::validate`]: crate::config::BenchConfig::validate
    #[must_use]
    pub fn for_elements(element_count: usize, block_size: u32) -> Self {
        let grid_size = element_count.div_ceil(block_size as usize) as u32;
        Self {
            grid_size,
            block_size,
            element_count,
        }
    }

    /// Total threads dispatched by the launch.
    #[must_use]
    pub fn total_threads(&self) -> u64 {
        self.grid_size as u64 * self.block_size as u64
    }

    /// Threads whose global index falls past the last element.
    #[must_use]
    pub fn idle_threads(&self) -> u64 {
        self.total_threads() - self.element_count as u64
    }

    /// Whether the launch dispatches no work at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grid_size == 0
    }

    /// Global thread index for a (group, lane) pair.
    #[inline]
    #[must_use]
    pub fn global_index(&self, block_idx: u32, thread_idx: u32) -> usize {
        block_idx as usize * self.block_size as usize + thread_idx as usize
    }

    /// Grid dimensions in `(x, y, z)` form.
    #[must_use]
    pub fn grid_dim(&self) -> (u32, u32, u32) {
        (self.grid_size, 1, 1)
    }

    /// Block dimensions in `(x, y, z)` form.
    #[must_use]
    pub fn block_dim(&self) -> (u32, u32, u32) {
        (self.block_size, 1, 1)
    }
}
