//! Parsing, formatting and timing helpers behind the `polyfft` binary.

use clap::ValueEnum;
use polyfft::{Algorithm, Complex64, FftImpl, PolyMultiplier};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::error::Error;
use std::io::{self, BufRead};
use std::time::{Duration, Instant};

/// Transform formulation selectable on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlgorithmArg {
    Recursive,
    #[default]
    Iterative,
    Staged,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Recursive => Algorithm::Recursive,
            AlgorithmArg::Iterative => Algorithm::Iterative,
            AlgorithmArg::Staged => Algorithm::Staged,
        }
    }
}

fn invalid_data(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

/// Transform for `algorithm`. With the `parallel` feature the staged
/// formulation runs on a Rayon pool sized by the environment.
pub fn build_fft(algorithm: AlgorithmArg) -> Result<Box<dyn FftImpl<f64>>, Box<dyn Error>> {
    #[cfg(feature = "parallel")]
    if algorithm == AlgorithmArg::Staged {
        use polyfft::staged::{RayonExecutor, StagedFftImpl};
        let executor = RayonExecutor::from_config()?;
        log::debug!("staged transform on {} threads", executor.threads());
        return Ok(Box::new(StagedFftImpl::<f64, _>::with_executor(executor)));
    }
    Ok(polyfft::new_fft_impl(algorithm.into()))
}

pub fn build_multiplier(algorithm: AlgorithmArg) -> Result<PolyMultiplier<f64>, Box<dyn Error>> {
    Ok(PolyMultiplier::with_fft(build_fft(algorithm)?))
}

/// Parse a comma-separated coefficient list such as `1, 2.5,-3`.
pub fn parse_coefficients(s: &str) -> Result<Vec<f64>, Box<dyn Error>> {
    let coeffs = s
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.parse::<f64>()
                .map_err(|e| invalid_data(format!("bad coefficient {:?}: {}", t, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if coeffs.is_empty() {
        return Err(invalid_data("empty coefficient list".into()).into());
    }
    Ok(coeffs)
}

/// Read two integer polynomials in the interactive format: a coefficient
/// count `n`, then `n` coefficients of the first operand, then `n` of the
/// second. Tokens may be split over lines arbitrarily.
pub fn read_polynomials<R: BufRead>(reader: R) -> Result<(Vec<i64>, Vec<i64>), Box<dyn Error>> {
    let mut tokens = Vec::new();
    for line in reader.lines() {
        let line = line?;
        tokens.extend(line.split_whitespace().map(str::to_owned));
    }
    let mut it = tokens.into_iter();
    let n: usize = it
        .next()
        .ok_or_else(|| invalid_data("missing coefficient count".into()))?
        .parse()
        .map_err(|e| invalid_data(format!("bad coefficient count: {}", e)))?;
    if n == 0 {
        return Err(invalid_data("coefficient count must be positive".into()).into());
    }
    let mut read = |which: &str| -> Result<Vec<i64>, io::Error> {
        (0..n)
            .map(|i| {
                let tok = it.next().ok_or_else(|| {
                    invalid_data(format!("{} operand: expected {} coefficients, got {}", which, n, i))
                })?;
                tok.parse::<i64>()
                    .map_err(|e| invalid_data(format!("bad coefficient {:?}: {}", tok, e)))
            })
            .collect()
    };
    let lhs = read("first")?;
    let rhs = read("second")?;
    Ok((lhs, rhs))
}

pub fn format_integer(index: usize, value: i64) -> String {
    format!("[{}] = {}", index, value)
}

pub fn format_real(index: usize, value: f64) -> String {
    format!("[{}] = {:.4}", index, value)
}

/// `[k] = re + imi`, with the sign pulled out of the imaginary part.
pub fn format_complex(index: usize, value: Complex64) -> String {
    let sign = if value.im < 0.0 { '-' } else { '+' };
    format!("[{}] = {:.4} {} {:.4}i", index, value.re, sign, value.im.abs())
}

/// Largest operand size the timing sweep accepts, as a power of two.
pub const MAX_BENCH_LOG: u32 = 30;

pub fn format_timing(log_n: u32, elapsed: Duration) -> String {
    let n = match 1u128.checked_shl(log_n) {
        Some(n) => n.to_string(),
        None => "overflow".to_string(),
    };
    format!(
        "[N = 2^{:<2} = {:<7}] Time elapsed: {:.9} sec",
        log_n,
        n,
        elapsed.as_secs_f64()
    )
}

/// Random integer polynomial with `n` coefficients in `0..max_coeff`.
pub fn random_polynomial(rng: &mut StdRng, n: usize, max_coeff: i64) -> Vec<i64> {
    (0..n).map(|_| rng.gen_range(0..max_coeff.max(1))).collect()
}

/// Mean time of one multiplication of two random polynomials of `n`
/// coefficients, over `iterations` runs.
pub fn time_multiply(
    mul: &PolyMultiplier<f64>,
    n: usize,
    iterations: usize,
    max_coeff: i64,
    seed: u64,
) -> Result<Duration, Box<dyn Error>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let lhs = random_polynomial(&mut rng, n, max_coeff);
    let rhs = random_polynomial(&mut rng, n, max_coeff);
    let iterations = iterations.max(1);
    let start = Instant::now();
    for _ in 0..iterations {
        mul.multiply_integers(&lhs, &rhs)?;
    }
    Ok(mean_duration(start.elapsed(), iterations))
}

/// `total / iterations`, without narrowing the count to `u32`.
pub fn mean_duration(total: Duration, iterations: usize) -> Duration {
    Duration::from_secs_f64(total.as_secs_f64() / iterations.max(1) as f64)
}
