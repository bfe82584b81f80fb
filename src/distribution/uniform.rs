//! Uniform random distribution
//!
//! Every whole block of the target file has equal probability. Block indices are
//! drawn from a fixed-range 64-bit source (xoshiro256++) with rejection sampling:
//! raw draws that fall in the incomplete top bucket of the source range are
//! discarded, so reducing the accepted draw modulo `num_blocks` carries no
//! modulo bias.
//!
//! # Example
//!
//! ```
//! use benchmark_io::distribution::{Distribution, uniform::UniformDistribution};
//!
//! let mut dist = UniformDistribution::with_seed(42);
//!
//! for i in 0..10 {
//!     let block_num = dist.next_block(i, 1024);
//!     assert!(block_num < 1024);
//! }
//! ```

use super::Distribution;
use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Uniform random distribution
///
/// Generic over the raw source so tests can feed it chosen 64-bit values.
pub struct UniformDistribution<R: RngCore = Xoshiro256PlusPlus> {
    rng: R,
    rejected: u64,
}

impl UniformDistribution<Xoshiro256PlusPlus> {
    /// Create a new uniform distribution with a specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(Xoshiro256PlusPlus::seed_from_u64(seed))
    }
}

impl<R: RngCore> UniformDistribution<R> {
    /// Wrap an already seeded 64-bit source
    pub fn from_rng(rng: R) -> Self {
        Self { rng, rejected: 0 }
    }

    /// Number of raw draws discarded so far
    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    /// Unbiased draw in [0, n)
    ///
    /// The source yields 2^64 equally likely values. `2^64 % n` of them (the top
    /// of the range) would make the low residues more likely, so they are
    /// redrawn. Accepted draws are `x <= u64::MAX - (2^64 % n)`.
    #[inline]
    fn sample_below(&mut self, n: u64) -> u64 {
        debug_assert!(n > 0);
        let excess = (u64::MAX % n + 1) % n;
        let limit = u64::MAX - excess;
        loop {
            let x = self.rng.next_u64();
            if x <= limit {
                return x % n;
            }
            self.rejected += 1;
        }
    }
}

impl<R: RngCore + Send> Distribution for UniformDistribution<R> {
    #[inline(always)]
    fn next_block(&mut self, _index: u64, num_blocks: u64) -> u64 {
        if num_blocks <= 1 {
            return 0;
        }
        self.sample_below(num_blocks)
    }
}
