use polyfft::dft::dft;
use polyfft::iterative::IterativeFftImpl;
use polyfft::recursive::RecursiveFftImpl;
use polyfft::staged::StagedFftImpl;
use polyfft::{new_fft_impl, Algorithm, Complex64, Direction, FftError, FftImpl};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Relative tolerance for comparisons between formulations.
const EPSILON: f64 = 1e-9;

const ALGORITHMS: [Algorithm; 3] = [
    Algorithm::Recursive,
    Algorithm::Iterative,
    Algorithm::Staged,
];

fn random_vector(rng: &mut StdRng, n: usize) -> Vec<Complex64> {
    (0..n)
        .map(|_| Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
        .collect()
}

fn assert_close(a: &[Complex64], b: &[Complex64], context: &str) {
    assert_eq!(a.len(), b.len(), "{}: length", context);
    let scale = b
        .iter()
        .map(|c| c.norm_sqr().sqrt())
        .fold(1.0f64, f64::max);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        assert!(
            (x.re - y.re).abs() <= EPSILON * scale && (x.im - y.im).abs() <= EPSILON * scale,
            "{}: index {}: {:?} vs {:?}",
            context,
            i,
            x,
            y
        );
    }
}

#[test]
fn roundtrip_all_formulations() {
    let mut rng = StdRng::seed_from_u64(42);
    for algorithm in ALGORITHMS {
        let fft = new_fft_impl::<f64>(algorithm);
        for log_n in 0..=10 {
            let n = 1usize << log_n;
            let orig = random_vector(&mut rng, n);
            let mut data = orig.clone();
            fft.fft(&mut data).unwrap();
            fft.ifft_unscaled(&mut data).unwrap();
            let scaled: Vec<Complex64> = data.iter().map(|c| c.scale(1.0 / n as f64)).collect();
            assert_close(&scaled, &orig, &format!("{:?} n={}", algorithm, n));
        }
    }
}

#[test]
fn formulations_agree() {
    let mut rng = StdRng::seed_from_u64(7);
    let recursive = RecursiveFftImpl::<f64>::new();
    let iterative = IterativeFftImpl::<f64>::default();
    let staged = StagedFftImpl::<f64>::default();
    for direction in [Direction::Forward, Direction::Inverse] {
        for log_n in 0..=10 {
            let n = 1usize << log_n;
            let input = random_vector(&mut rng, n);
            let r = recursive.transform_recursive(&input, direction).unwrap();
            let i = iterative.transform_vec(&input, direction).unwrap();
            let s = staged.transform_vec(&input, direction).unwrap();
            let context = format!("{:?} n={}", direction, n);
            assert_close(&i, &r, &context);
            assert_close(&s, &r, &context);
        }
    }
}

#[test]
fn matches_reference_dft() {
    let mut rng = StdRng::seed_from_u64(3);
    for log_n in 0..=6 {
        let n = 1usize << log_n;
        let input = random_vector(&mut rng, n);
        for direction in [Direction::Forward, Direction::Inverse] {
            let expected = dft(&input, direction).unwrap();
            for algorithm in ALGORITHMS {
                let out = new_fft_impl::<f64>(algorithm)
                    .transform_vec(&input, direction)
                    .unwrap();
                assert_close(&out, &expected, &format!("{:?} {:?} n={}", algorithm, direction, n));
            }
        }
    }
}

#[test]
fn cosine_peaks_at_plus_minus_one() {
    let n = 8;
    let mut data: Vec<Complex64> = (0..n)
        .map(|i| Complex64::new((2.0 * std::f64::consts::PI * i as f64 / n as f64).cos(), 0.0))
        .collect();
    new_fft_impl::<f64>(Algorithm::Staged).fft(&mut data).unwrap();
    for (k, c) in data.iter().enumerate() {
        let expected = if k == 1 || k == n - 1 { 4.0 } else { 0.0 };
        assert!((c.re - expected).abs() < 1e-12, "k={} re={}", k, c.re);
        assert!(c.im.abs() < 1e-12, "k={} im={}", k, c.im);
    }
}

#[test]
fn rejects_invalid_lengths() {
    for algorithm in ALGORITHMS {
        let fft = new_fft_impl::<f64>(algorithm);
        for n in [0usize, 3, 6, 12, 1000] {
            let mut data = vec![Complex64::one(); n];
            assert_eq!(
                fft.transform(&mut data, Direction::Forward),
                Err(FftError::InvalidLength(n)),
                "{:?} n={}",
                algorithm,
                n
            );
        }
    }
}

#[test]
fn out_of_place_leaves_input_untouched() {
    let input: Vec<Complex64> = (1..=4).map(|i| Complex64::new(i as f64, 0.0)).collect();
    let mut output = vec![Complex64::zero(); 4];
    let fft = new_fft_impl::<f64>(Algorithm::Iterative);
    fft.transform_out_of_place(&input, &mut output, Direction::Forward)
        .unwrap();
    assert_eq!(input[0].re, 1.0);
    assert_eq!(input[3].re, 4.0);
    assert!((output[0].re - 10.0).abs() < 1e-12);
}

#[test]
fn single_precision_roundtrip() {
    let mut rng = StdRng::seed_from_u64(11);
    let orig: Vec<polyfft::Complex32> = (0..256)
        .map(|_| polyfft::Complex32::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0)))
        .collect();
    for algorithm in ALGORITHMS {
        let fft = new_fft_impl::<f32>(algorithm);
        let mut data = orig.clone();
        fft.fft(&mut data).unwrap();
        fft.ifft(&mut data).unwrap();
        for (a, b) in data.iter().zip(orig.iter()) {
            assert!((a.re - b.re).abs() < 1e-3, "re: {} vs {}", a.re, b.re);
            assert!((a.im - b.im).abs() < 1e-3, "im: {} vs {}", a.im, b.im);
        }
    }
}
