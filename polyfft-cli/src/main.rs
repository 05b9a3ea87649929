use clap::{Parser, Subcommand};
use polyfft::{Complex64, Direction};
use polyfft_cli::*;
use std::error::Error;
use std::io::{self, BufWriter, Write};

/// Multiply polynomials with a radix-2 FFT.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Log transform decisions to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Multiply two polynomials, lowest degree first
    Mul {
        /// Comma-separated coefficients of the first operand
        #[arg(long, allow_hyphen_values = true, requires = "rhs")]
        lhs: Option<String>,

        /// Comma-separated coefficients of the second operand
        #[arg(long, allow_hyphen_values = true, requires = "lhs")]
        rhs: Option<String>,

        #[arg(long, value_enum, default_value_t = AlgorithmArg::Iterative)]
        algorithm: AlgorithmArg,

        /// Round the product to integers
        #[arg(long)]
        integer: bool,
    },
    /// Evaluate a polynomial at the roots of unity
    Eval {
        /// Comma-separated coefficients, zero-padded to a power of two
        #[arg(long, allow_hyphen_values = true)]
        coeffs: String,

        /// Run the inverse transform, scaled by 1/N
        #[arg(long)]
        inverse: bool,

        #[arg(long, value_enum, default_value_t = AlgorithmArg::Iterative)]
        algorithm: AlgorithmArg,
    },
    /// Time multiplications of random polynomials of doubling size
    Bench {
        /// Largest operand size as a power of two
        #[arg(
            long,
            default_value_t = 15,
            value_parser = clap::value_parser!(u32).range(1..=MAX_BENCH_LOG as i64)
        )]
        max_log: u32,

        /// Multiplications timed per size
        #[arg(long, default_value_t = 100)]
        iterations: usize,

        /// Coefficients are drawn from 0..max_coeff
        #[arg(long, default_value_t = 10)]
        max_coeff: i64,

        #[arg(long, default_value_t = 0)]
        seed: u64,

        #[arg(long, value_enum, default_value_t = AlgorithmArg::Iterative)]
        algorithm: AlgorithmArg,
    },
}

fn run(command: Commands) -> Result<(), Box<dyn Error>> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match command {
        Commands::Mul {
            lhs,
            rhs,
            algorithm,
            integer,
        } => {
            let mul = build_multiplier(algorithm)?;
            match (lhs, rhs) {
                (Some(lhs), Some(rhs)) => {
                    let a = parse_coefficients(&lhs)?;
                    let b = parse_coefficients(&rhs)?;
                    let product = mul.multiply(&a, &b)?;
                    for (j, c) in product.into_iter().enumerate() {
                        if integer {
                            writeln!(out, "{}", format_integer(j, c.round() as i64))?;
                        } else {
                            writeln!(out, "{}", format_real(j, c))?;
                        }
                    }
                }
                _ => {
                    let (a, b) = read_polynomials(io::stdin().lock())?;
                    let product = mul.multiply_integers(&a, &b)?;
                    for (j, c) in product.into_iter().enumerate() {
                        writeln!(out, "{}", format_integer(j, c))?;
                    }
                }
            }
        }
        Commands::Eval {
            coeffs,
            inverse,
            algorithm,
        } => {
            let coeffs: Vec<Complex64> = parse_coefficients(&coeffs)?
                .into_iter()
                .map(Complex64::from_real)
                .collect();
            let mul = build_multiplier(algorithm)?;
            let values = if inverse {
                let n = coeffs
                    .len()
                    .checked_next_power_of_two()
                    .ok_or(polyfft::FftError::InvalidLength(coeffs.len()))?;
                mul.interpolate(&polyfft::poly::pad(&coeffs, n))?
            } else {
                mul.evaluate(&coeffs)?
            };
            log::debug!(
                "{:?} transform of {} points",
                if inverse {
                    Direction::Inverse
                } else {
                    Direction::Forward
                },
                values.len()
            );
            for (k, v) in values.into_iter().enumerate() {
                writeln!(out, "{}", format_complex(k, v))?;
            }
        }
        Commands::Bench {
            max_log,
            iterations,
            max_coeff,
            seed,
            algorithm,
        } => {
            let mul = build_multiplier(algorithm)?;
            for log_n in 1..=max_log {
                let elapsed = time_multiply(&mul, 1usize << log_n, iterations, max_coeff, seed)?;
                writeln!(out, "{}", format_timing(log_n, elapsed))?;
                out.flush()?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::builder().filter_level(level).init();

    if let Err(e) = run(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
