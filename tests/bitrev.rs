use polyfft::bitrev::{bit_reverse_copy, bit_reverse_permute, reverse_bits};
use polyfft::FftError;
use proptest::prelude::*;

#[test]
fn eight_point_layout() {
    let mut data: Vec<u8> = (0..8).collect();
    bit_reverse_permute(&mut data).unwrap();
    assert_eq!(data, vec![0, 4, 2, 6, 1, 5, 3, 7]);
}

#[test]
fn single_element_is_fixed() {
    let mut data = [42u32];
    bit_reverse_permute(&mut data).unwrap();
    assert_eq!(data, [42]);
}

#[test]
fn empty_is_rejected() {
    let mut data: [u32; 0] = [];
    assert_eq!(bit_reverse_permute(&mut data), Err(FftError::InvalidLength(0)));
}

proptest! {
    #[test]
    fn permutation_is_an_involution(log_n in 0u32..=10, seed in any::<u64>()) {
        let n = 1usize << log_n;
        let orig: Vec<u64> = (0..n as u64).map(|i| i.wrapping_mul(seed | 1)).collect();
        let mut data = orig.clone();
        bit_reverse_permute(&mut data).unwrap();
        bit_reverse_permute(&mut data).unwrap();
        prop_assert_eq!(data, orig);
    }

    #[test]
    fn copy_twice_restores(log_n in 0u32..=10) {
        let n = 1usize << log_n;
        let orig: Vec<u32> = (0..n as u32).collect();
        let mut once = vec![0u32; n];
        let mut twice = vec![0u32; n];
        bit_reverse_copy(&orig, &mut once).unwrap();
        bit_reverse_copy(&once, &mut twice).unwrap();
        prop_assert_eq!(twice, orig);
    }

    #[test]
    fn reverse_bits_is_its_own_inverse(bits in 1u32..=20, index in any::<usize>()) {
        let index = index & ((1usize << bits) - 1);
        prop_assert_eq!(reverse_bits(reverse_bits(index, bits), bits), index);
    }
}
