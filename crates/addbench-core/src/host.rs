//! Host-side elementwise addition.
//!
//! The main loop works on fixed 8-wide lanes (one AVX2 register of `f32`)
//! so the optimizer emits packed adds; the remainder is handled scalar.

use crate::error::{AddBenchError, Result};

/// `f32` lanes processed per step.
pub const LANES: usize = 8;

/// Compute `z[i] = x[i] + y[i]` into a new vector.
pub fn add_arrays(x: &[f32], y: &[f32]) -> Result<Vec<f32>> {
    let mut z = vec![0.0f32; x.len()];
    add_arrays_into(x, y, &mut z)?;
    Ok(z)
}

/// Compute `z[i] = x[i] + y[i]` into an existing buffer.
pub fn add_arrays_into(x: &[f32], y: &[f32], z: &mut [f32]) -> Result<()> {
    check_len(x.len(), y.len())?;
    check_len(x.len(), z.len())?;

    let mut xs = x.chunks_exact(LANES);
    let mut ys = y.chunks_exact(LANES);
    let mut zs = z.chunks_exact_mut(LANES);

    for ((xc, yc), zc) in (&mut xs).zip(&mut ys).zip(&mut zs) {
        add_lanes(xc, yc, zc);
    }

    for ((a, b), out) in xs
        .remainder()
        .iter()
        .zip(ys.remainder())
        .zip(zs.into_remainder())
    {
        *out = a + b;
    }

    Ok(())
}

#[inline(always)]
fn add_lanes(x: &[f32], y: &[f32], z: &mut [f32]) {
    for ((a, b), out) in x[..LANES].iter().zip(&y[..LANES]).zip(&mut z[..LANES]) {
        *out = a + b;
    }
}

fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(AddBenchError::LengthMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_small() {
        let z = add_arrays(&[1.0, 2.0, 3.0], &[0.5, 0.25, -3.0]).unwrap();
        assert_eq!(z, vec![1.5, 2.25, 0.0]);
    }

    #[test]
    fn test_add_matches_scalar_across_lane_boundaries() {
        for n in [0usize, 1, 7, 8, 9, 16, 31, 1000] {
            let x: Vec<f32> = (0..n).map(|i| i as f32 * 0.5).collect();
            let y: Vec<f32> = (0..n).map(|i| 1.0 - i as f32 * 0.25).collect();
            let z = add_arrays(&x, &y).unwrap();

            assert_eq!(z.len(), n);
            for i in 0..n {
                assert_eq!(z[i], x[i] + y[i], "mismatch at {} for n={}", i, n);
            }
        }
    }

    #[test]
    fn test_length_mismatch() {
        let err = add_arrays(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert!(matches!(
            err,
            AddBenchError::LengthMismatch {
                expected: 2,
                actual: 1
            }
        ));

        let mut z = vec![0.0; 3];
        assert!(add_arrays_into(&[1.0, 2.0], &[1.0, 2.0], &mut z).is_err());
    }

    #[test]
    fn test_empty() {
        assert!(add_arrays(&[], &[]).unwrap().is_empty());
    }
}
