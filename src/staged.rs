//! Staged data-parallel FFT.
//!
//! The iterative transform rewritten as a pipeline of `1 + log2(N)` stages:
//! one permutation stage followed by one butterfly stage per span
//! `2, 4, ..., N`. Inside a stage every task writes disjoint output slots, so
//! tasks can run in any order on any number of lanes. Between stages there is
//! a full barrier: a [`StageExecutor`] method returning is that barrier.
//!
//! Stages read one buffer and write the other (ping-pong), so no task ever
//! reads a slot another task of the same stage is writing.
//!
//! [`SequentialExecutor`] runs the tasks in order. With the `parallel`
//! feature [`RayonExecutor`] spreads them over a Rayon pool.

use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::fft::{validate_len, Direction, FftError, FftImpl, FftPlanner};
use crate::fft_kernels::{butterfly_block, permute_task};
use crate::num::{Complex, Float};

/// One step of the staged pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Stage 0: scatter every element to its bit-reversed slot.
    Permute,
    /// Stage `index` in `1..=log2(N)`, combining pairs `span / 2` apart.
    Butterfly { index: u32, span: usize },
}

impl Stage {
    pub fn index(self) -> u32 {
        match self {
            Stage::Permute => 0,
            Stage::Butterfly { index, .. } => index,
        }
    }
}

/// The stage schedule of a length-`2^log_n` transform.
pub fn stages(log_n: u32) -> impl Iterator<Item = Stage> {
    core::iter::once(Stage::Permute).chain((1..=log_n).map(|index| Stage::Butterfly {
        index,
        span: 1usize << index,
    }))
}

/// Runs the tasks of one stage. Implementations may use any number of lanes
/// but must not return before every task of the stage has finished writing.
pub trait StageExecutor<T: Float> {
    /// `dst[rev(i)] = src[i]` for every `i`, with `src.len() == 2^bits`.
    fn permute(&self, src: &[Complex<T>], dst: &mut [Complex<T>], bits: u32);

    /// One butterfly per `(block, j)` with span `2 * twiddles.len()`.
    fn butterflies(&self, src: &[Complex<T>], dst: &mut [Complex<T>], twiddles: &[Complex<T>]);

    /// `dst[i] *= rhs[i]`.
    fn pointwise_mul(&self, dst: &mut [Complex<T>], rhs: &[Complex<T>]);

    /// `data[i] *= factor`.
    fn scale(&self, data: &mut [Complex<T>], factor: T);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialExecutor;

impl<T: Float> StageExecutor<T> for SequentialExecutor {
    fn permute(&self, src: &[Complex<T>], dst: &mut [Complex<T>], bits: u32) {
        for (i, out) in dst.iter_mut().enumerate() {
            *out = permute_task(src, i, bits);
        }
    }

    fn butterflies(&self, src: &[Complex<T>], dst: &mut [Complex<T>], twiddles: &[Complex<T>]) {
        let span = 2 * twiddles.len();
        for (out, inp) in dst.chunks_exact_mut(span).zip(src.chunks_exact(span)) {
            butterfly_block(inp, out, twiddles);
        }
    }

    fn pointwise_mul(&self, dst: &mut [Complex<T>], rhs: &[Complex<T>]) {
        for (a, &b) in dst.iter_mut().zip(rhs.iter()) {
            *a = a.mul(b);
        }
    }

    fn scale(&self, data: &mut [Complex<T>], factor: T) {
        for c in data.iter_mut() {
            *c = c.scale(factor);
        }
    }
}

#[cfg(feature = "parallel")]
pub use self::rayon_executor::RayonExecutor;

#[cfg(feature = "parallel")]
mod rayon_executor {
    use alloc::sync::Arc;

    use rayon::prelude::*;
    use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

    use super::{SequentialExecutor, StageExecutor};
    use crate::config::{parallel_grain, parallel_min_len, ParallelConfig};
    use crate::fft_kernels::{butterfly, permute_task};
    use crate::num::{Complex, Float};

    /// Executes every stage on a Rayon pool. Stages shorter than
    /// [`parallel_min_len`](crate::config::parallel_min_len) run on the
    /// calling thread instead.
    #[derive(Clone, Default)]
    pub struct RayonExecutor {
        pool: Option<Arc<ThreadPool>>,
    }

    impl RayonExecutor {
        /// Use Rayon's global pool.
        pub fn new() -> Self {
            Self::default()
        }

        /// Build a dedicated pool with `threads` workers.
        pub fn with_threads(threads: usize) -> Result<Self, ThreadPoolBuildError> {
            let pool = ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| alloc::format!("polyfft-stage-{}", i))
                .build()?;
            Ok(Self {
                pool: Some(Arc::new(pool)),
            })
        }

        /// Build a dedicated pool sized from the current [`ParallelConfig`].
        pub fn from_config() -> Result<Self, ThreadPoolBuildError> {
            Self::with_threads(ParallelConfig::current().threads)
        }

        pub fn threads(&self) -> usize {
            match &self.pool {
                Some(pool) => pool.current_num_threads(),
                None => rayon::current_num_threads(),
            }
        }

        fn run<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
            match &self.pool {
                Some(pool) => pool.install(op),
                None => op(),
            }
        }
    }

    fn sequential(len: usize) -> bool {
        len < parallel_min_len()
    }

    impl<T: Float> StageExecutor<T> for RayonExecutor {
        fn permute(&self, src: &[Complex<T>], dst: &mut [Complex<T>], bits: u32) {
            if sequential(dst.len()) {
                return SequentialExecutor.permute(src, dst, bits);
            }
            let grain = parallel_grain();
            self.run(|| {
                dst.par_iter_mut()
                    .with_min_len(grain)
                    .enumerate()
                    .for_each(|(i, out)| *out = permute_task(src, i, bits));
            });
        }

        fn butterflies(
            &self,
            src: &[Complex<T>],
            dst: &mut [Complex<T>],
            twiddles: &[Complex<T>],
        ) {
            if sequential(dst.len()) {
                return SequentialExecutor.butterflies(src, dst, twiddles);
            }
            let half = twiddles.len();
            let span = 2 * half;
            let grain = parallel_grain();
            self.run(|| {
                dst.par_chunks_mut(span)
                    .zip(src.par_chunks(span))
                    .with_min_len((grain / half).max(1))
                    .for_each(|(out, inp)| {
                        let (src_lo, src_hi) = inp.split_at(half);
                        let (dst_lo, dst_hi) = out.split_at_mut(half);
                        dst_lo
                            .par_iter_mut()
                            .zip(dst_hi.par_iter_mut())
                            .with_min_len(grain)
                            .enumerate()
                            .for_each(|(j, (lo, hi))| {
                                let (a, b) = butterfly(src_lo[j], src_hi[j], twiddles[j]);
                                *lo = a;
                                *hi = b;
                            });
                    });
            });
        }

        fn pointwise_mul(&self, dst: &mut [Complex<T>], rhs: &[Complex<T>]) {
            if sequential(dst.len()) {
                return SequentialExecutor.pointwise_mul(dst, rhs);
            }
            let grain = parallel_grain();
            self.run(|| {
                dst.par_iter_mut()
                    .zip(rhs.par_iter())
                    .with_min_len(grain)
                    .for_each(|(a, &b)| *a = a.mul(b));
            });
        }

        fn scale(&self, data: &mut [Complex<T>], factor: T) {
            if sequential(data.len()) {
                return SequentialExecutor.scale(data, factor);
            }
            let grain = parallel_grain();
            self.run(|| {
                data.par_iter_mut()
                    .with_min_len(grain)
                    .for_each(|c| *c = c.scale(factor));
            });
        }
    }
}

pub struct StagedFftImpl<T: Float, E: StageExecutor<T> = SequentialExecutor> {
    executor: E,
    planner: RefCell<FftPlanner<T>>,
}

impl<T: Float> Default for StagedFftImpl<T, SequentialExecutor> {
    fn default() -> Self {
        Self::with_executor(SequentialExecutor)
    }
}

impl<T: Float, E: StageExecutor<T>> StagedFftImpl<T, E> {
    pub fn with_executor(executor: E) -> Self {
        Self {
            executor,
            planner: RefCell::new(FftPlanner::new()),
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    fn run_stage(
        &self,
        stage: Stage,
        src: &[Complex<T>],
        dst: &mut [Complex<T>],
        bits: u32,
        direction: Direction,
    ) {
        log::trace!("stage {} ({:?}) over {} points", stage.index(), stage, src.len());
        match stage {
            Stage::Permute => self.executor.permute(src, dst, bits),
            Stage::Butterfly { span, .. } => {
                let twiddles = self.planner.borrow_mut().get_twiddles(span, direction);
                self.executor.butterflies(src, dst, &twiddles);
            }
        }
    }

    /// Run the full stage schedule over `data`, using `scratch` as the
    /// second ping-pong buffer. The result always ends up in `data`.
    fn run_pipeline(
        &self,
        data: &mut [Complex<T>],
        scratch: &mut [Complex<T>],
        bits: u32,
        direction: Direction,
    ) {
        let mut executed = 0usize;
        {
            let mut src: &mut [Complex<T>] = &mut *data;
            let mut dst: &mut [Complex<T>] = &mut *scratch;
            for stage in stages(bits) {
                self.run_stage(stage, src, dst, bits, direction);
                core::mem::swap(&mut src, &mut dst);
                executed += 1;
            }
        }
        // An odd number of stages leaves the last output in scratch.
        if executed % 2 == 1 {
            data.copy_from_slice(scratch);
        }
    }
}

impl<T: Float, E: StageExecutor<T>> FftImpl<T> for StagedFftImpl<T, E> {
    fn transform(&self, data: &mut [Complex<T>], direction: Direction) -> Result<(), FftError> {
        let bits = validate_len(data.len())?;
        if bits == 0 {
            return Ok(());
        }
        let mut scratch = vec![Complex::zero(); data.len()];
        self.run_pipeline(data, &mut scratch, bits, direction);
        Ok(())
    }

    /// Multi-operand pipeline: forward stages for both operands, a
    /// point-wise product stage, the inverse stages and a scaling stage.
    fn convolve_cyclic(
        &self,
        lhs: &mut [Complex<T>],
        rhs: &mut [Complex<T>],
    ) -> Result<(), FftError> {
        if lhs.len() != rhs.len() {
            return Err(FftError::MismatchedLengths {
                expected: lhs.len(),
                actual: rhs.len(),
            });
        }
        let bits = validate_len(lhs.len())?;
        if bits == 0 {
            lhs[0] = lhs[0].mul(rhs[0]);
            return Ok(());
        }
        let mut scratch: Vec<Complex<T>> = vec![Complex::zero(); lhs.len()];
        self.run_pipeline(lhs, &mut scratch, bits, Direction::Forward);
        self.run_pipeline(rhs, &mut scratch, bits, Direction::Forward);
        log::trace!("pointwise product stage over {} points", lhs.len());
        self.executor.pointwise_mul(lhs, rhs);
        self.run_pipeline(lhs, &mut scratch, bits, Direction::Inverse);
        let factor = T::one() / T::from_f64(lhs.len() as f64);
        self.executor.scale(lhs, factor);
        Ok(())
    }
}
