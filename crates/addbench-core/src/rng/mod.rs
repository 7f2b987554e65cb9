//! Deterministic input generation.
//!
//! `x` and `y` are drawn from two Philox streams of the same seed. Filling is
//! split across rayon tasks; each chunk jumps its own generator to the chunk's
//! counter offset, so the result is bit-identical to a sequential draw.

mod philox;

pub use philox::{u32_to_unit_f32, PhiloxRng, PhiloxState, OUTPUTS_PER_BLOCK};

use rayon::prelude::*;
use tracing::debug;

/// Philox stream used for `x`.
pub const X_STREAM: u64 = 0;
/// Philox stream used for `y`.
pub const Y_STREAM: u64 = 1;

/// Outputs per parallel chunk. Must stay a multiple of [`OUTPUTS_PER_BLOCK`].
const FILL_CHUNK: usize = 1 << 16;

/// Fill `out` with uniform values in `[0, 1)` from one Philox stream.
pub fn fill_uniform(seed: u64, stream: u64, out: &mut [f32]) {
    out.par_chunks_mut(FILL_CHUNK)
        .enumerate()
        .for_each(|(chunk_idx, chunk)| {
            let mut rng = PhiloxRng::new(seed, stream);
            rng.skip((chunk_idx * FILL_CHUNK / OUTPUTS_PER_BLOCK) as u64);
            for value in chunk.iter_mut() {
                *value = rng.next_f32();
            }
        });
}

/// Generate `n` uniform values in `[0, 1)` from one Philox stream.
pub fn uniform_vec(seed: u64, stream: u64, n: usize) -> Vec<f32> {
    let mut out = vec![0.0f32; n];
    fill_uniform(seed, stream, &mut out);
    out
}

/// The two benchmark inputs. Immutable once generated.
#[derive(Debug, Clone, PartialEq)]
pub struct InputArrays {
    x: Vec<f32>,
    y: Vec<f32>,
    seed: u64,
}

impl InputArrays {
    /// Generate both inputs for `seed` with `n` elements each.
    pub fn generate(seed: u64, n: usize) -> Self {
        debug!(seed, n, "Generating input arrays");
        let (x, y) = rayon::join(
            || uniform_vec(seed, X_STREAM, n),
            || uniform_vec(seed, Y_STREAM, n),
        );
        Self { x, y, seed }
    }

    /// First input.
    pub fn x(&self) -> &[f32] {
        &self.x
    }

    /// Second input.
    pub fn y(&self) -> &[f32] {
        &self.y
    }

    /// Seed the inputs were generated from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Element count of each input.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the inputs are empty.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_fill_matches_sequential() {
        // Spans several chunks and ends on a partial one.
        let n = FILL_CHUNK * 3 + 17;
        let parallel = uniform_vec(5, X_STREAM, n);

        let mut rng = PhiloxRng::new(5, X_STREAM);
        let sequential: Vec<f32> = (0..n).map(|_| rng.next_f32()).collect();

        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_generate_is_bit_identical() {
        let a = InputArrays::generate(0, 4096);
        let b = InputArrays::generate(0, 4096);

        let bits = |v: &[f32]| v.iter().map(|f| f.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(a.x()), bits(b.x()));
        assert_eq!(bits(a.y()), bits(b.y()));
    }

    #[test]
    fn test_x_and_y_differ() {
        let inputs = InputArrays::generate(0, 64);
        assert_eq!(inputs.len(), 64);
        assert_ne!(inputs.x(), inputs.y());
    }

    #[test]
    fn test_adjacent_seeds_share_no_input() {
        let a = InputArrays::generate(0, 8);
        let b = InputArrays::generate(1, 8);

        assert_ne!(a.x(), b.x());
        assert_ne!(a.y(), b.y());
        assert_ne!(a.y(), b.x());
        assert_ne!(a.x(), b.y());
    }

    #[test]
    fn test_prefix_stable_across_sizes() {
        let small = InputArrays::generate(3, 16);
        let large = InputArrays::generate(3, 1000);
        assert_eq!(small.x(), &large.x()[..16]);
        assert_eq!(small.y(), &large.y()[..16]);
    }

    #[test]
    fn test_values_in_unit_interval() {
        let inputs = InputArrays::generate(11, 10_000);
        assert!(inputs
            .x()
            .iter()
            .chain(inputs.y())
            .all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn test_empty() {
        let inputs = InputArrays::generate(0, 0);
        assert!(inputs.is_empty());
        assert!(inputs.y().is_empty());
    }
}
