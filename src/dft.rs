//! Reference implementations used as test oracles.
//!
//! Both routines are quadratic and exist to check the fast paths, not to
//! replace them.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{AddAssign, Mul};

use crate::fft::{Direction, FftError};
use crate::num::{Complex, Float};

/// Naive DFT with the same sign convention as the fast transforms. Works for
/// any non-zero length.
pub fn dft<T: Float>(input: &[Complex<T>], direction: Direction) -> Result<Vec<Complex<T>>, FftError> {
    let n = input.len();
    if n == 0 {
        return Err(FftError::InvalidLength(0));
    }
    let angle: T = direction.root_angle(n);
    let mut output = Vec::with_capacity(n);
    for k in 0..n {
        let mut acc = Complex::zero();
        for (j, &x) in input.iter().enumerate() {
            // reduce k*j mod n first so the angle stays small
            let w = Complex::expi(angle * T::from_f64(((k * j) % n) as f64));
            acc = acc.add(x.mul(w));
        }
        output.push(acc);
    }
    Ok(output)
}

/// Brute-force polynomial product `c[i + j] += a[i] * b[j]`.
///
/// Returns an empty vector when either operand is empty.
pub fn convolve_naive<T>(lhs: &[T], rhs: &[T]) -> Vec<T>
where
    T: Copy + Default + AddAssign + Mul<Output = T>,
{
    if lhs.is_empty() || rhs.is_empty() {
        return Vec::new();
    }
    let mut out = vec![T::default(); lhs.len() + rhs.len() - 1];
    for (i, &a) in lhs.iter().enumerate() {
        for (j, &b) in rhs.iter().enumerate() {
            out[i + j] += a * b;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::num::Complex64;

    #[test]
    fn test_convolve_naive_small() {
        assert_eq!(convolve_naive(&[1i64, 2, 3], &[1]), vec![1, 2, 3]);
        assert_eq!(convolve_naive(&[1i64, 1], &[1, 1]), vec![1, 2, 1]);
        assert!(convolve_naive::<i64>(&[], &[1]).is_empty());
    }

    #[test]
    fn test_dft_non_power_of_two() {
        let input = [Complex64::one(); 3];
        let out = dft(&input, Direction::Forward).unwrap();
        assert!((out[0].re - 3.0).abs() < 1e-12);
        assert!(out[1].norm_sqr() < 1e-24);
        assert!(out[2].norm_sqr() < 1e-24);
    }

    #[test]
    fn test_dft_empty() {
        assert_eq!(
            dft::<f64>(&[], Direction::Forward),
            Err(FftError::InvalidLength(0))
        );
    }
}
