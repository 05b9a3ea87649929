//! Recursive radix-2 decimation-in-time FFT.
//!
//! The textbook divide-and-conquer form: split into even and odd
//! coefficients, transform both halves, then combine them with one butterfly
//! per output pair. Every recursion level owns its half-size scratch vectors
//! and drops them on return.

use alloc::vec::Vec;
use core::marker::PhantomData;

use crate::fft::{validate_len, Direction, FftError, FftImpl};
use crate::fft_kernels::butterfly;
use crate::num::{Complex, Float};

pub struct RecursiveFftImpl<T: Float> {
    _marker: PhantomData<T>,
}

impl<T: Float> Default for RecursiveFftImpl<T> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: Float> RecursiveFftImpl<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value-returning form: evaluate `input` at the `N`-th roots of unity
    /// and return the result in a fresh vector.
    pub fn transform_recursive(
        &self,
        input: &[Complex<T>],
        direction: Direction,
    ) -> Result<Vec<Complex<T>>, FftError> {
        validate_len(input.len())?;
        Ok(recurse(input, direction))
    }
}

fn recurse<T: Float>(a: &[Complex<T>], direction: Direction) -> Vec<Complex<T>> {
    let n = a.len();
    if n == 1 {
        return a.to_vec();
    }
    let half = n / 2;
    let (even, odd): (Vec<_>, Vec<_>) = a.chunks_exact(2).map(|pair| (pair[0], pair[1])).unzip();
    let y_even = recurse(&even, direction);
    let y_odd = recurse(&odd, direction);

    let angle: T = direction.root_angle(n);
    let mut y = alloc::vec![Complex::zero(); n];
    for k in 0..half {
        let w = Complex::expi(angle * T::from_f64(k as f64));
        let (lo, hi) = butterfly(y_even[k], y_odd[k], w);
        y[k] = lo;
        y[k + half] = hi;
    }
    y
}

impl<T: Float> FftImpl<T> for RecursiveFftImpl<T> {
    fn transform(&self, data: &mut [Complex<T>], direction: Direction) -> Result<(), FftError> {
        let out = self.transform_recursive(data, direction)?;
        data.copy_from_slice(&out);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::num::Complex64;
    use alloc::vec;

    #[test]
    fn test_single_element_is_identity() {
        let fft = RecursiveFftImpl::<f64>::new();
        let out = fft
            .transform_recursive(&[Complex64::new(5.0, -1.0)], Direction::Forward)
            .unwrap();
        assert_eq!(out, vec![Complex64::new(5.0, -1.0)]);
    }

    #[test]
    fn test_impulse_is_flat() {
        let fft = RecursiveFftImpl::<f64>::new();
        let mut data = vec![Complex64::zero(); 8];
        data[0] = Complex64::one();
        fft.fft(&mut data).unwrap();
        for c in &data {
            assert!((c.re - 1.0).abs() < 1e-12);
            assert!(c.im.abs() < 1e-12);
        }
    }

    #[test]
    fn test_forward_sign_convention() {
        // x[1] = 1 gives X[k] = exp(-2πik/4) under the forward convention.
        let fft = RecursiveFftImpl::<f64>::new();
        let input = [
            Complex64::zero(),
            Complex64::one(),
            Complex64::zero(),
            Complex64::zero(),
        ];
        let out = fft.transform_recursive(&input, Direction::Forward).unwrap();
        assert!((out[1].re).abs() < 1e-12);
        assert!((out[1].im + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_non_power_of_two() {
        let fft = RecursiveFftImpl::<f64>::new();
        let mut data = vec![Complex64::one(); 12];
        assert_eq!(
            fft.transform(&mut data, Direction::Forward),
            Err(FftError::InvalidLength(12))
        );
        assert_eq!(
            fft.transform_recursive(&[], Direction::Inverse),
            Err(FftError::InvalidLength(0))
        );
    }
}
