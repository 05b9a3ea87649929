//! Bit-reversal permutation.
//!
//! Index `i` of a length-`2^b` buffer is exchanged with the index obtained by
//! reversing the low `b` bits of `i`. The mapping is its own inverse, so
//! applying a permutation twice restores the original order.

use crate::fft::{validate_len, FftError};

/// Reverse the low `bits` bits of `index`.
#[inline(always)]
pub fn reverse_bits(index: usize, bits: u32) -> usize {
    if bits == 0 {
        return 0;
    }
    index.reverse_bits() >> (usize::BITS - bits)
}

/// Permute `data` into bit-reversed order in place.
pub fn bit_reverse_permute<T: Copy>(data: &mut [T]) -> Result<(), FftError> {
    let bits = validate_len(data.len())?;
    for i in 0..data.len() {
        let j = reverse_bits(i, bits);
        if i < j {
            data.swap(i, j);
        }
    }
    Ok(())
}

/// Copy `input` into `output` with `input[i]` landing at `output[rev(i)]`.
///
/// e.g. for `n = 8`, `input[4]` (`100b`) is stored at `output[1]` (`001b`).
pub fn bit_reverse_copy<T: Copy>(input: &[T], output: &mut [T]) -> Result<(), FftError> {
    let bits = validate_len(input.len())?;
    if output.len() != input.len() {
        return Err(FftError::MismatchedLengths {
            expected: input.len(),
            actual: output.len(),
        });
    }
    for (i, &value) in input.iter().enumerate() {
        output[reverse_bits(i, bits)] = value;
    }
    Ok(())
}
