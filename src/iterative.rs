//! In-place iterative radix-2 FFT.
//!
//! The recursion of [`crate::recursive`] unrolled into a bit-reversal
//! permutation followed by `log2(N)` butterfly passes over blocks of size
//! `2, 4, ..., N`.

use core::cell::RefCell;

use crate::bitrev::bit_reverse_permute;
use crate::fft::{validate_len, Direction, FftError, FftImpl, FftPlanner};
use crate::fft_kernels::butterfly;
use crate::num::{Complex, Float};

pub struct IterativeFftImpl<T: Float> {
    planner: RefCell<FftPlanner<T>>,
}

impl<T: Float> Default for IterativeFftImpl<T> {
    fn default() -> Self {
        Self {
            planner: RefCell::new(FftPlanner::new()),
        }
    }
}

impl<T: Float> IterativeFftImpl<T> {
    pub fn with_planner(planner: FftPlanner<T>) -> Self {
        Self {
            planner: RefCell::new(planner),
        }
    }
}

impl<T: Float> FftImpl<T> for IterativeFftImpl<T> {
    fn transform(&self, data: &mut [Complex<T>], direction: Direction) -> Result<(), FftError> {
        let n = data.len();
        validate_len(n)?;
        if n == 1 {
            return Ok(());
        }
        bit_reverse_permute(data)?;

        let mut span = 2;
        while span <= n {
            let twiddles = self.planner.borrow_mut().get_twiddles(span, direction);
            let half = span / 2;
            for block in data.chunks_exact_mut(span) {
                let (lo, hi) = block.split_at_mut(half);
                for j in 0..half {
                    let (a, b) = butterfly(lo[j], hi[j], twiddles[j]);
                    lo[j] = a;
                    hi[j] = b;
                }
            }
            span <<= 1;
        }
        Ok(())
    }
}
