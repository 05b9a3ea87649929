//! Polynomial multiplication through point-value form.
//!
//! Both operands are zero-padded to a common power-of-two length
//! `N >= len(a) + len(b) - 1`, transformed forward, multiplied point-wise,
//! transformed back and divided by `N`. Padding at least that far keeps the
//! cyclic convolution computed by the transform free of wrap-around terms.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::fft::{new_fft_impl, validate_len, Algorithm, Direction, FftError, FftImpl};
use crate::num::{Complex, Float};

/// Transform length needed to multiply operands of the given lengths.
pub fn padded_len(lhs_len: usize, rhs_len: usize) -> Result<usize, FftError> {
    if lhs_len == 0 || rhs_len == 0 {
        log::debug!(
            "rejecting empty operand (lengths {} and {})",
            lhs_len,
            rhs_len
        );
        return Err(FftError::InvalidLength(0));
    }
    let product_len = lhs_len + rhs_len - 1;
    product_len
        .checked_next_power_of_two()
        .ok_or(FftError::InvalidLength(product_len))
}

/// Copy `coeffs` and extend with zeros up to `n` entries.
pub fn pad<T: Float>(coeffs: &[Complex<T>], n: usize) -> Vec<Complex<T>> {
    let mut out = Vec::with_capacity(n.max(coeffs.len()));
    out.extend_from_slice(coeffs);
    out.resize(n.max(coeffs.len()), Complex::zero());
    out
}

pub struct PolyMultiplier<T: Float> {
    fft: Box<dyn FftImpl<T>>,
}

impl<T: Float> Default for PolyMultiplier<T> {
    fn default() -> Self {
        Self::new(Algorithm::default())
    }
}

impl<T: Float> PolyMultiplier<T> {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            fft: new_fft_impl(algorithm),
        }
    }

    /// Use a caller-supplied transform, e.g. a staged transform on a
    /// parallel executor.
    pub fn with_fft(fft: Box<dyn FftImpl<T>>) -> Self {
        Self { fft }
    }

    pub fn fft(&self) -> &dyn FftImpl<T> {
        self.fft.as_ref()
    }

    /// Product of two complex coefficient vectors, lowest degree first. The
    /// result has `lhs.len() + rhs.len() - 1` entries.
    pub fn multiply_complex(
        &self,
        lhs: &[Complex<T>],
        rhs: &[Complex<T>],
    ) -> Result<Vec<Complex<T>>, FftError> {
        let n = padded_len(lhs.len(), rhs.len())?;
        log::debug!(
            "multiplying operands of length {} and {} at N={}",
            lhs.len(),
            rhs.len(),
            n
        );
        let mut a = pad(lhs, n);
        let mut b = pad(rhs, n);
        self.fft.convolve_cyclic(&mut a, &mut b)?;
        a.truncate(lhs.len() + rhs.len() - 1);
        Ok(a)
    }

    /// Product of two real coefficient vectors. The imaginary residue of the
    /// inverse transform is dropped.
    pub fn multiply(&self, lhs: &[T], rhs: &[T]) -> Result<Vec<T>, FftError> {
        let a: Vec<Complex<T>> = lhs.iter().map(|&x| Complex::from_real(x)).collect();
        let b: Vec<Complex<T>> = rhs.iter().map(|&x| Complex::from_real(x)).collect();
        let product = self.multiply_complex(&a, &b)?;
        Ok(product.into_iter().map(|c| c.re).collect())
    }

    /// Product of integer polynomials, rounding each coefficient to the
    /// nearest integer. Exact while coefficients stay well inside the
    /// mantissa of `T`.
    pub fn multiply_integers(&self, lhs: &[i64], rhs: &[i64]) -> Result<Vec<i64>, FftError> {
        let a: Vec<T> = lhs.iter().map(|&x| T::from_f64(x as f64)).collect();
        let b: Vec<T> = rhs.iter().map(|&x| T::from_f64(x as f64)).collect();
        let product = self.multiply(&a, &b)?;
        Ok(product.into_iter().map(|x| x.round().to_f64() as i64).collect())
    }

    /// Multiply operands that are already zero-padded to the same
    /// power-of-two length, writing the product into `lhs`.
    ///
    /// The product is cyclic: terms of degree `>= lhs.len()` wrap around, so
    /// the caller must have padded far enough.
    pub fn multiply_in_place(
        &self,
        lhs: &mut [Complex<T>],
        rhs: &[Complex<T>],
    ) -> Result<(), FftError> {
        validate_len(lhs.len())?;
        if rhs.len() != lhs.len() {
            return Err(FftError::MismatchedLengths {
                expected: lhs.len(),
                actual: rhs.len(),
            });
        }
        let mut b = rhs.to_vec();
        self.fft.convolve_cyclic(lhs, &mut b)
    }

    /// Point-value form of `coeffs` at the `N`-th roots of unity, with `N`
    /// the next power of two at or above `coeffs.len()`.
    pub fn evaluate(&self, coeffs: &[Complex<T>]) -> Result<Vec<Complex<T>>, FftError> {
        if coeffs.is_empty() {
            return Err(FftError::InvalidLength(0));
        }
        let n = coeffs
            .len()
            .checked_next_power_of_two()
            .ok_or(FftError::InvalidLength(coeffs.len()))?;
        let mut values = pad(coeffs, n);
        self.fft.transform(&mut values, Direction::Forward)?;
        Ok(values)
    }

    /// Coefficients of the polynomial taking `values` at the roots of unity.
    /// `values.len()` must be a power of two.
    pub fn interpolate(&self, values: &[Complex<T>]) -> Result<Vec<Complex<T>>, FftError> {
        let mut coeffs = values.to_vec();
        self.fft.ifft(&mut coeffs)?;
        Ok(coeffs)
    }
}
