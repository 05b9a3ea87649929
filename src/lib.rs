//! # polyfft - FFT polynomial multiplication for Rust
//!
//! Multiplies polynomials by moving their coefficient vectors into
//! point-value form with a radix-2 Fast Fourier Transform, multiplying
//! point-wise and transforming back.
//!
//! ## Features
//!
//! - **Three formulations of one transform**: recursive divide and conquer,
//!   iterative in-place (bit reversal + butterfly passes), and a staged
//!   pipeline of barrier-separated data-parallel stages
//! - **Pluggable stage executors**: sequential, or Rayon with the `parallel`
//!   feature
//! - **`no_std` + `alloc`** core, trigonometry through `libm`
//!
//! ## Cargo Features
//!
//! - `std` (default): `std::error::Error` for [`FftError`]
//! - `parallel`: Rayon stage executor and the [`config`] module
//!
//! ## Sign convention
//!
//! Forward transforms evaluate at `exp(-2πik/N)`, inverse transforms at
//! `exp(+2πik/N)`. Neither direction scales; [`FftImpl::ifft`] and the
//! multiplier divide by `N`.
//!
//! ## Example
//!
//! ```
//! let product = polyfft::multiply(&[1.0, 2.0, 3.0], &[1.0, 1.0]).unwrap();
//! let expected = [1.0, 3.0, 5.0, 3.0];
//! for (p, e) in product.iter().zip(expected.iter()) {
//!     assert!((p - e).abs() < 1e-9);
//! }
//! ```
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 (https://www.apache.org/licenses/LICENSE-2.0)
//! - MIT license (https://opensource.org/licenses/MIT)
//!
//! at your option.

#![no_std]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// Complex arithmetic and the [`Float`] abstraction over `f32`/`f64`.
pub mod num;

/// Transform trait, direction convention, errors and twiddle cache.
pub mod fft;

/// Per-task kernels shared by all formulations.
pub mod fft_kernels;

/// Bit-reversal permutation.
pub mod bitrev;

/// Recursive divide-and-conquer FFT.
pub mod recursive;

/// Iterative in-place FFT.
pub mod iterative;

/// Barrier-separated staged FFT with pluggable executors.
pub mod staged;

/// Polynomial multiplication.
pub mod poly;

/// Quadratic reference DFT and convolution.
pub mod dft;

/// Parallel executor tuning
///
/// Environment variables and process-wide overrides.
#[cfg(feature = "parallel")]
pub mod config;

pub use fft::{new_fft_impl, Algorithm, Direction, FftError, FftImpl, FftPlanner};
pub use num::{Complex, Complex32, Complex64, Float};
pub use poly::PolyMultiplier;

/// Multiply two real polynomials (lowest degree first) with the default
/// transform.
pub fn multiply(lhs: &[f64], rhs: &[f64]) -> Result<alloc::vec::Vec<f64>, FftError> {
    PolyMultiplier::<f64>::default().multiply(lhs, rhs)
}
