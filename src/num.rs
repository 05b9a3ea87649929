//! Scalar and complex number primitives shared by every transform.
//!
//! The transforms only ever combine values through [`Complex::add`],
//! [`Complex::sub`] and [`Complex::mul`], so rounding behaviour is decided in
//! exactly one place.

use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Neg, Sub};

// Minimal float trait for generic transforms (no_std, trig through libm)
pub trait Float:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + Debug
    + Default
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Send
    + Sync
    + 'static
{
    fn zero() -> Self;
    fn one() -> Self;
    fn from_f64(x: f64) -> Self;
    fn to_f64(self) -> f64;
    fn sin_cos(self) -> (Self, Self);
    fn pi() -> Self;
    fn abs(self) -> Self;
    fn round(self) -> Self;
}

impl Float for f32 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
    fn from_f64(x: f64) -> Self {
        x as f32
    }
    fn to_f64(self) -> f64 {
        self as f64
    }
    fn sin_cos(self) -> (Self, Self) {
        libm::sincosf(self)
    }
    fn pi() -> Self {
        core::f32::consts::PI
    }
    fn abs(self) -> Self {
        libm::fabsf(self)
    }
    fn round(self) -> Self {
        libm::roundf(self)
    }
}

impl Float for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
    fn from_f64(x: f64) -> Self {
        x
    }
    fn to_f64(self) -> f64 {
        self
    }
    fn sin_cos(self) -> (Self, Self) {
        libm::sincos(self)
    }
    fn pi() -> Self {
        core::f64::consts::PI
    }
    fn abs(self) -> Self {
        libm::fabs(self)
    }
    fn round(self) -> Self {
        libm::round(self)
    }
}

/// A complex value `re + i·im`.
///
/// Plain `Copy` data with no identity beyond its two components.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Complex<T: Float> {
    pub re: T,
    pub im: T,
}

impl<T: Float> Complex<T> {
    pub fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
    pub fn zero() -> Self {
        Self {
            re: T::zero(),
            im: T::zero(),
        }
    }
    pub fn one() -> Self {
        Self {
            re: T::one(),
            im: T::zero(),
        }
    }
    /// A purely real value.
    pub fn from_real(re: T) -> Self {
        Self { re, im: T::zero() }
    }
    /// `exp(i·theta)`, a point on the unit circle.
    #[inline(always)]
    pub fn expi(theta: T) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self { re: cos, im: sin }
    }
    #[allow(clippy::should_implement_trait)]
    #[inline(always)]
    pub fn add(self, other: Self) -> Self {
        Self {
            re: self.re + other.re,
            im: self.im + other.im,
        }
    }
    #[allow(clippy::should_implement_trait)]
    #[inline(always)]
    pub fn sub(self, other: Self) -> Self {
        Self {
            re: self.re - other.re,
            im: self.im - other.im,
        }
    }
    #[allow(clippy::should_implement_trait)]
    #[inline(always)]
    pub fn mul(self, other: Self) -> Self {
        Self {
            re: self.re * other.re - self.im * other.im,
            im: self.re * other.im + self.im * other.re,
        }
    }
    #[inline(always)]
    pub fn conj(self) -> Self {
        Self {
            re: self.re,
            im: -self.im,
        }
    }
    /// Multiply both components by a real factor.
    #[inline(always)]
    pub fn scale(self, factor: T) -> Self {
        Self {
            re: self.re * factor,
            im: self.im * factor,
        }
    }
    pub fn norm_sqr(self) -> T {
        self.re * self.re + self.im * self.im
    }
}

impl<T: Float> Neg for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

impl<T: Float> Add for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn add(self, other: Self) -> Self {
        Complex::<T>::add(self, other)
    }
}

impl<T: Float> Sub for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn sub(self, other: Self) -> Self {
        Complex::<T>::sub(self, other)
    }
}

impl<T: Float> Mul for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn mul(self, other: Self) -> Self {
        Complex::<T>::mul(self, other)
    }
}

impl<T: Float> From<(T, T)> for Complex<T> {
    fn from((re, im): (T, T)) -> Self {
        Self { re, im }
    }
}

impl<T: Float> From<Complex<T>> for (T, T) {
    fn from(c: Complex<T>) -> Self {
        (c.re, c.im)
    }
}

pub type Complex32 = Complex<f32>;
pub type Complex64 = Complex<f64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complex_operations() {
        let a = Complex64::new(1.0, -2.0);
        let b = Complex64::new(3.0, 4.0);
        assert_eq!(a.add(b), Complex64::new(4.0, 2.0));
        assert_eq!(a.sub(b), Complex64::new(-2.0, -6.0));
        // (1 - 2i)(3 + 4i) = 3 + 4i - 6i + 8 = 11 - 2i
        assert_eq!(a.mul(b), Complex64::new(11.0, -2.0));
        assert_eq!(a * b, a.mul(b));
        let n = -a;
        assert_eq!(n.re, -1.0);
        assert_eq!(n.im, 2.0);
    }

    #[test]
    fn test_expi_quarter_turn() {
        let c = Complex64::expi(<f64 as Float>::pi() / 2.0);
        assert!(c.re.abs() < 1e-15);
        assert!((c.im - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_pair_conversion() {
        let c: Complex32 = (1.5f32, -0.5f32).into();
        let (re, im): (f32, f32) = c.into();
        assert_eq!((re, im), (1.5, -0.5));
    }

    #[test]
    fn test_power_of_two_lengths_convert_exactly() {
        // f32 loses odd integers above 2^24 but keeps every power of two
        let n = (1u64 << 30) as f64;
        assert_eq!(<f32 as Float>::from_f64(n), 1_073_741_824.0);
        assert_eq!(<f32 as Float>::from_f64(n).to_f64(), n);
        assert_eq!(<f64 as Float>::from_f64(1024.0), 1024.0);
    }
}
