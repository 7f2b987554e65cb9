//! Kernel sources.
//!
//! Sources are plain CUDA C text. Each backend turns a [`KernelSource`] into
//! its own callable handle through [`DeviceBackend::compile`].
//!
//! [`DeviceBackend::compile`]: crate::backend::DeviceBackend::compile

/// CUDA C source for elementwise addition.
///
/// One thread per element; threads past `size` do nothing.
pub const ADD_ARRAYS_CUDA: &str = r#"
extern "C" __global__
void add_arrays(const float* x, const float* y, float* z, int size)
{
    int tid = blockIdx.x * blockDim.x + threadIdx.x;
    if (tid < size) {
        z[tid] = x[tid] + y[tid];
    }
}
"#;

/// The elementwise-add kernel.
pub const ADD_ARRAYS_KERNEL: KernelSource = KernelSource::new("add_arrays", ADD_ARRAYS_CUDA);

/// Kernel source text plus the entry point to load from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelSource {
    entry: &'static str,
    source: &'static str,
}

impl KernelSource {
    /// Create a kernel source.
    pub const fn new(entry: &'static str, source: &'static str) -> Self {
        Self { entry, source }
    }

    /// Entry point name.
    pub fn entry(&self) -> &'static str {
        self.entry
    }

    /// Source text.
    pub fn source(&self) -> &'static str {
        self.source
    }

    /// Whether the source declares a `__global__` function named [`entry`].
    ///
    /// [`entry`]: KernelSource::entry
    pub fn declares_entry(&self) -> bool {
        self.source.match_indices("__global__").any(|(pos, marker)| {
            let rest = &self.source[pos + marker.len()..];
            let Some(paren) = rest.find('(') else {
                return false;
            };
            rest[..paren]
                .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .rev()
                .find(|token| !token.is_empty())
                == Some(self.entry)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_kernel_declares_entry() {
        assert_eq!(ADD_ARRAYS_KERNEL.entry(), "add_arrays");
        assert!(ADD_ARRAYS_KERNEL.declares_entry());
        assert!(ADD_ARRAYS_KERNEL.source().contains("if (tid < size)"));
    }

    #[test]
    fn test_missing_entry() {
        let source = KernelSource::new("sub_arrays", ADD_ARRAYS_CUDA);
        assert!(!source.declares_entry());
    }

    #[test]
    fn test_device_function_is_not_an_entry() {
        let source = KernelSource::new(
            "helper",
            "__device__ float helper(float a) { return a; }\n\
             extern \"C\" __global__ void main_kernel(float* a) {}",
        );
        assert!(!source.declares_entry());

        let source = KernelSource::new("main_kernel", source.source());
        assert!(source.declares_entry());
    }
}
