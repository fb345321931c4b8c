//! Index resampling with replacement
//!
//! A replicate is `n` indices drawn independently and uniformly from
//! `0..n`. The resampler only consumes randomness from the generator it is
//! handed; it owns no random state of its own.
//!
//! For whole bootstrap runs every replicate gets its own ChaCha8 stream
//! derived from the master seed and the replicate index
//! ([`replicate_rng`]). Replicate `i` therefore sees the same random numbers
//! no matter how many workers run the loop or in which order they finish.

use bootstats_core::{Error, Result};
use rand::distributions::{Distribution, Uniform};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Random generator used for bootstrap replicates
pub type ReplicateRng = ChaCha8Rng;

/// Independent random stream for one replicate
///
/// The master seed selects the key, the replicate index selects the stream,
/// so streams for different indices never overlap.
pub fn replicate_rng(master_seed: u64, replicate: usize) -> ReplicateRng {
    let mut rng = ChaCha8Rng::seed_from_u64(master_seed);
    rng.set_stream(replicate as u64);
    rng
}

/// Draws bootstrap replicates with replacement
#[derive(Debug, Clone, Copy, Default)]
pub struct Resampler;

impl Resampler {
    pub fn new() -> Self {
        Self
    }

    /// Draw `n` indices uniformly from `0..n`
    pub fn indices<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<usize>> {
        let mut out = Vec::with_capacity(n);
        self.indices_into(n, rng, &mut out)?;
        Ok(out)
    }

    /// Draw `n` indices into a reusable buffer
    pub fn indices_into<R: Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
        out: &mut Vec<usize>,
    ) -> Result<()> {
        if n == 0 {
            return Err(Error::empty_input("resampling"));
        }
        let dist = Uniform::new(0, n);
        out.clear();
        out.extend((0..n).map(|_| dist.sample(rng)));
        Ok(())
    }

    /// Fill `out` with one replicate of `source`
    pub fn resample_into<T: Copy, R: Rng + ?Sized>(
        &self,
        source: &[T],
        rng: &mut R,
        out: &mut Vec<T>,
    ) -> Result<()> {
        if source.is_empty() {
            return Err(Error::empty_input("resampling"));
        }
        draw_replicate(source, rng, out);
        Ok(())
    }

    /// One replicate of `source` as a new vector
    pub fn resample<T: Copy, R: Rng + ?Sized>(&self, source: &[T], rng: &mut R) -> Result<Vec<T>> {
        let mut out = Vec::with_capacity(source.len());
        self.resample_into(source, rng, &mut out)?;
        Ok(out)
    }
}

/// Replicate draw without the emptiness check; callers validate `source`
/// once before entering the replicate loop.
pub(crate) fn draw_replicate<T: Copy, R: Rng + ?Sized>(source: &[T], rng: &mut R, out: &mut Vec<T>) {
    debug_assert!(!source.is_empty());
    let dist = Uniform::new(0, source.len());
    out.clear();
    out.extend((0..source.len()).map(|_| source[dist.sample(rng)]));
}
