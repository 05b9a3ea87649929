//! Run-time tuning of the parallel stage executor.
//!
//! Each knob is resolved in order: process-wide override set through the
//! `set_*` functions, then the environment variable (read once), then the
//! built-in default. Setting an override to `0` removes it.
//!
//! | Variable               | Default            | Meaning                                      |
//! |------------------------|--------------------|----------------------------------------------|
//! | `POLYFFT_PAR_MIN_LEN`  | 4096               | shortest transform run on the Rayon pool      |
//! | `POLYFFT_PAR_THREADS`  | `num_cpus::get()`  | workers in a dedicated pool                   |
//! | `POLYFFT_PAR_GRAIN`    | 256                | minimum butterfly tasks per Rayon job         |

use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

pub const DEFAULT_PARALLEL_MIN_LEN: usize = 4096;
pub const DEFAULT_PARALLEL_GRAIN: usize = 256;

pub const ENV_PARALLEL_MIN_LEN: &str = "POLYFFT_PAR_MIN_LEN";
pub const ENV_PARALLEL_THREADS: &str = "POLYFFT_PAR_THREADS";
pub const ENV_PARALLEL_GRAIN: &str = "POLYFFT_PAR_GRAIN";

static PARALLEL_MIN_LEN_OVERRIDE: AtomicUsize = AtomicUsize::new(0);
static PARALLEL_THREADS_OVERRIDE: AtomicUsize = AtomicUsize::new(0);
static PARALLEL_GRAIN_OVERRIDE: AtomicUsize = AtomicUsize::new(0);
static PARALLEL_ENV: OnceLock<ParallelEnv> = OnceLock::new();

struct ParallelEnv {
    min_len: usize,
    threads: usize,
    grain: usize,
}

fn env_usize(name: &str) -> Option<usize> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<usize>() {
        Ok(0) => None,
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("ignoring {}={:?}: not a positive integer", name, raw);
            None
        }
    }
}

fn parallel_env() -> &'static ParallelEnv {
    PARALLEL_ENV.get_or_init(|| {
        let env = ParallelEnv {
            min_len: env_usize(ENV_PARALLEL_MIN_LEN).unwrap_or(DEFAULT_PARALLEL_MIN_LEN),
            threads: env_usize(ENV_PARALLEL_THREADS).unwrap_or_else(|| num_cpus::get().max(1)),
            grain: env_usize(ENV_PARALLEL_GRAIN).unwrap_or(DEFAULT_PARALLEL_GRAIN),
        };
        log::debug!(
            "parallel config: min_len={} threads={} grain={}",
            env.min_len,
            env.threads,
            env.grain
        );
        env
    })
}

fn resolve(slot: &AtomicUsize, fallback: usize) -> usize {
    match slot.load(Ordering::Relaxed) {
        0 => fallback,
        v => v,
    }
}

/// Set the shortest transform length executed on the Rayon pool.
pub fn set_parallel_min_len(len: usize) {
    PARALLEL_MIN_LEN_OVERRIDE.store(len, Ordering::Relaxed);
}

/// Set the worker count used when an executor builds its own pool.
pub fn set_parallel_threads(threads: usize) {
    PARALLEL_THREADS_OVERRIDE.store(threads, Ordering::Relaxed);
}

/// Set the minimum number of tasks handed to one Rayon job.
pub fn set_parallel_grain(grain: usize) {
    PARALLEL_GRAIN_OVERRIDE.store(grain, Ordering::Relaxed);
}

pub fn parallel_min_len() -> usize {
    resolve(&PARALLEL_MIN_LEN_OVERRIDE, parallel_env().min_len)
}

pub fn parallel_threads() -> usize {
    resolve(&PARALLEL_THREADS_OVERRIDE, parallel_env().threads)
}

pub fn parallel_grain() -> usize {
    resolve(&PARALLEL_GRAIN_OVERRIDE, parallel_env().grain)
}

/// Snapshot of the effective parallel settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelConfig {
    pub min_len: usize,
    pub threads: usize,
    pub grain: usize,
}

impl ParallelConfig {
    pub fn current() -> Self {
        Self {
            min_len: parallel_min_len(),
            threads: parallel_threads(),
            grain: parallel_grain(),
        }
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self::current()
    }
}
