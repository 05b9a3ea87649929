//! Single-task kernels shared by every transform formulation.
//!
//! Each function computes the work of exactly one task of one stage so the
//! sequential and parallel executors produce bit-identical results.

use crate::bitrev::reverse_bits;
use crate::num::{Complex, Float};

/// Two-point combine `(even + w·odd, even - w·odd)`.
#[inline(always)]
pub fn butterfly<T: Float>(
    even: Complex<T>,
    odd: Complex<T>,
    twiddle: Complex<T>,
) -> (Complex<T>, Complex<T>) {
    let t = twiddle.mul(odd);
    (even.add(t), even.sub(t))
}

/// Value of output slot `index` of the permutation stage.
///
/// Written as a gather (`out[i] = src[rev(i)]`), which equals the scatter
/// `out[rev(i)] = src[i]` because bit reversal is an involution.
#[inline(always)]
pub fn permute_task<T: Float>(src: &[Complex<T>], index: usize, bits: u32) -> Complex<T> {
    src[reverse_bits(index, bits)]
}

/// Run every butterfly of one span over a block pair, reading `src` and
/// writing the matching block of `dst`.
#[inline]
pub fn butterfly_block<T: Float>(
    src: &[Complex<T>],
    dst: &mut [Complex<T>],
    twiddles: &[Complex<T>],
) {
    let half = twiddles.len();
    let (src_lo, src_hi) = src.split_at(half);
    let (dst_lo, dst_hi) = dst.split_at_mut(half);
    for j in 0..half {
        let (a, b) = butterfly(src_lo[j], src_hi[j], twiddles[j]);
        dst_lo[j] = a;
        dst_hi[j] = b;
    }
}
