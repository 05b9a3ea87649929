//! Fast Fourier Transform (FFT) front end.
//!
//! This module defines what every transform in the crate agrees on: the
//! [`Direction`] sign convention, the [`validate_len`] boundary guard, the
//! [`FftError`] type and the [`FftImpl`] trait. Three implementations of the
//! radix-2 [Cooley–Tukey algorithm](https://en.wikipedia.org/wiki/Cooley%E2%80%93Tukey_FFT_algorithm)
//! live in sibling modules and can be picked at run time through
//! [`Algorithm`] and [`new_fft_impl`]. A [`FftPlanner`] caches twiddle
//! factors for reuse.
//!
//! Transforms are unscaled in both directions. Dividing by `N` after an
//! inverse transform is left to the caller ([`FftImpl::ifft`] and
//! [`FftImpl::convolve_cyclic`] do it for you).

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use hashbrown::HashMap;

use crate::iterative::IterativeFftImpl;
use crate::recursive::RecursiveFftImpl;
use crate::staged::StagedFftImpl;

pub use crate::num::{Complex, Complex32, Complex64, Float};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftError {
    /// The length is zero or not a power of two.
    InvalidLength(usize),
    /// Two buffers that must agree in length do not.
    MismatchedLengths { expected: usize, actual: usize },
}

impl fmt::Display for FftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FftError::InvalidLength(n) => {
                write!(f, "transform length {} is not a positive power of two", n)
            }
            FftError::MismatchedLengths { expected, actual } => {
                write!(f, "expected a buffer of length {}, got {}", expected, actual)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FftError {}

/// Which way a transform evaluates.
///
/// `Forward` evaluates at `exp(-2πik/N)`, `Inverse` at `exp(+2πik/N)`.
/// Callers that want the opposite convention negate angles themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Forward,
    Inverse,
}

impl Direction {
    /// Angle of the principal `n`-th root of unity for this direction.
    pub fn root_angle<T: Float>(self, n: usize) -> T {
        let two_pi = T::from_f64(2.0) * T::pi();
        let n = T::from_f64(n as f64);
        match self {
            Direction::Forward => -two_pi / n,
            Direction::Inverse => two_pi / n,
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            Direction::Forward => Direction::Inverse,
            Direction::Inverse => Direction::Forward,
        }
    }
}

/// Check that `n` is a usable transform length and return `log2(n)`.
pub fn validate_len(n: usize) -> Result<u32, FftError> {
    if n == 0 || !n.is_power_of_two() {
        log::debug!("rejecting transform length {}", n);
        return Err(FftError::InvalidLength(n));
    }
    Ok(n.trailing_zeros())
}

/// Divide every element by the buffer length, undoing the `N` gain of an
/// unscaled inverse transform.
pub fn normalize<T: Float>(data: &mut [Complex<T>]) {
    if data.is_empty() {
        return;
    }
    let factor = T::one() / T::from_f64(data.len() as f64);
    for c in data.iter_mut() {
        *c = c.scale(factor);
    }
}

/// Twiddle factors for one butterfly span: `span/2` entries holding
/// `exp(i·root_angle(span)·k)`.
pub fn twiddle_table<T: Float>(span: usize, direction: Direction) -> Vec<Complex<T>> {
    let angle: T = direction.root_angle(span);
    (0..span / 2)
        .map(|k| Complex::expi(angle * T::from_f64(k as f64)))
        .collect()
}

pub struct FftPlanner<T: Float> {
    /// Cache of per-stage twiddle tables keyed by butterfly span and
    /// direction. The table for span `s` has `s/2` elements.
    cache: HashMap<(usize, Direction), Arc<[Complex<T>]>>,
}

impl<T: Float> Default for FftPlanner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> FftPlanner<T> {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Retrieve the contiguous twiddle table for a butterfly span.
    pub fn get_twiddles(&mut self, span: usize, direction: Direction) -> Arc<[Complex<T>]> {
        let table = self
            .cache
            .entry((span, direction))
            .or_insert_with(|| Arc::from(twiddle_table::<T>(span, direction)));
        Arc::clone(table)
    }

    /// Number of cached tables.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

/// The three formulations of the same transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// Divide and conquer with per-level scratch buffers.
    Recursive,
    /// Bit-reversal permutation followed by in-place butterfly passes.
    #[default]
    Iterative,
    /// Barrier-separated data-parallel stages over ping-pong buffers.
    Staged,
}

pub trait FftImpl<T: Float> {
    /// Transform `data` in place without scaling. `data.len()` must be a
    /// power of two.
    fn transform(&self, data: &mut [Complex<T>], direction: Direction) -> Result<(), FftError>;

    fn fft(&self, data: &mut [Complex<T>]) -> Result<(), FftError> {
        self.transform(data, Direction::Forward)
    }

    fn ifft_unscaled(&self, data: &mut [Complex<T>]) -> Result<(), FftError> {
        self.transform(data, Direction::Inverse)
    }

    /// Inverse transform followed by division by `N`.
    fn ifft(&self, data: &mut [Complex<T>]) -> Result<(), FftError> {
        self.transform(data, Direction::Inverse)?;
        normalize(data);
        Ok(())
    }

    fn transform_vec(
        &self,
        input: &[Complex<T>],
        direction: Direction,
    ) -> Result<Vec<Complex<T>>, FftError> {
        let mut out = input.to_vec();
        self.transform(&mut out, direction)?;
        Ok(out)
    }

    fn transform_out_of_place(
        &self,
        input: &[Complex<T>],
        output: &mut [Complex<T>],
        direction: Direction,
    ) -> Result<(), FftError> {
        if input.len() != output.len() {
            return Err(FftError::MismatchedLengths {
                expected: input.len(),
                actual: output.len(),
            });
        }
        output.copy_from_slice(input);
        self.transform(output, direction)
    }

    /// Cyclic convolution of two equal-length power-of-two buffers.
    ///
    /// Both operands are overwritten: `lhs` receives the product
    /// coefficients, `rhs` is left in point-value form.
    fn convolve_cyclic(
        &self,
        lhs: &mut [Complex<T>],
        rhs: &mut [Complex<T>],
    ) -> Result<(), FftError> {
        if lhs.len() != rhs.len() {
            return Err(FftError::MismatchedLengths {
                expected: lhs.len(),
                actual: rhs.len(),
            });
        }
        self.transform(lhs, Direction::Forward)?;
        self.transform(rhs, Direction::Forward)?;
        for (a, &b) in lhs.iter_mut().zip(rhs.iter()) {
            *a = a.mul(b);
        }
        self.transform(lhs, Direction::Inverse)?;
        normalize(lhs);
        Ok(())
    }
}

/// Build a boxed transform for the chosen formulation. The staged variant
/// uses the sequential executor; construct [`StagedFftImpl`] directly to pick
/// another one.
pub fn new_fft_impl<T: Float>(algorithm: Algorithm) -> Box<dyn FftImpl<T>> {
    match algorithm {
        Algorithm::Recursive => Box::new(RecursiveFftImpl::<T>::default()),
        Algorithm::Iterative => Box::new(IterativeFftImpl::<T>::default()),
        Algorithm::Staged => Box::new(StagedFftImpl::<T>::default()),
    }
}
