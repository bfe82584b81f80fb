//! Offset generation
//!
//! This module computes the byte offset of every operation in a run. Offsets are
//! produced in two steps: a [`Distribution`] picks a block index, and the
//! [`OffsetGenerator`] scales it by the block size.
//!
//! # Distributions
//!
//! - **Sequential**: block `i` for the i-th operation
//! - **Uniform**: independent, unbiased draws over every whole block of the file
//!
//! # Block-Based Design
//!
//! Distributions generate block numbers (0, 1, 2, ..., N-1) rather than byte offsets,
//! so every offset is naturally aligned to the block size:
//! `offset = block_num * block_size`.
//!
//! # Example
//!
//! ```
//! use benchmark_io::config::AccessPattern;
//! use benchmark_io::distribution::OffsetGenerator;
//!
//! let mut offsets = OffsetGenerator::new(AccessPattern::SequentialRead, 4096, 4096 * 1000, 0);
//! assert_eq!(offsets.offset(0), 0);
//! assert_eq!(offsets.offset(1), 4096);
//!
//! let mut offsets = OffsetGenerator::new(AccessPattern::RandomRead, 4096, 4096 * 1000, 42);
//! let offset = offsets.offset(0);
//! assert_eq!(offset % 4096, 0);
//! assert!(offset <= 4096 * 999);
//! ```

pub mod sequential;
pub mod uniform;

use crate::config::{AccessPattern, Config};
use crate::util::time::time_seed;
use sequential::SequentialDistribution;
use uniform::UniformDistribution;

/// Distribution trait for block number generation
///
/// # Thread Safety
///
/// Distributions must be `Send` so a run can be moved to another thread before it
/// starts. A distribution is owned by exactly one run.
pub trait Distribution: Send {
    /// Block number for the operation at `index`, in the range [0, num_blocks)
    ///
    /// `num_blocks` is never 0 for a validated configuration.
    fn next_block(&mut self, index: u64, num_blocks: u64) -> u64;
}

/// Computes the byte offset of the i-th operation for one run
pub struct OffsetGenerator {
    block_size: u64,
    num_blocks: u64,
    seed: u64,
    distribution: Box<dyn Distribution>,
}

impl OffsetGenerator {
    /// Create a generator for the given pattern and file geometry
    ///
    /// `seed` is only used by random patterns. It seeds the generator exactly
    /// once; the generator is never reseeded afterwards.
    pub fn new(pattern: AccessPattern, block_size: u64, file_size: u64, seed: u64) -> Self {
        let distribution: Box<dyn Distribution> = if pattern.is_random() {
            Box::new(UniformDistribution::with_seed(seed))
        } else {
            Box::new(SequentialDistribution::new())
        };

        Self {
            block_size,
            num_blocks: if block_size == 0 { 0 } else { file_size / block_size },
            seed,
            distribution,
        }
    }

    /// Create a generator from a run configuration
    ///
    /// Uses the configured seed, or a time-derived one when none is set.
    pub fn from_config(config: &Config) -> Self {
        let seed = config.seed.unwrap_or_else(time_seed);
        tracing::debug!(seed, pattern = %config.pattern, "seeding offset generator");
        Self::new(config.pattern, config.block_size, config.file_size, seed)
    }

    /// Byte offset of the operation at `index`
    #[inline]
    pub fn offset(&mut self, index: u64) -> u64 {
        self.distribution.next_block(index, self.num_blocks) * self.block_size
    }

    #[cfg(test)]
    fn num_blocks(&self) -> u64 {
        self.num_blocks
    }

    /// Seed the generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[cfg(test)]
    fn max_offset(&self) -> u64 {
        self.num_blocks.saturating_sub(1) * self.block_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_offsets() {
        let block_size = 4096;
        let op_count = 1000;
        let mut gen = OffsetGenerator::new(
            AccessPattern::SequentialWrite,
            block_size,
            block_size * op_count,
            0,
        );

        let mut previous = None;
        for i in 0..op_count {
            let offset = gen.offset(i);
            assert_eq!(offset, i * block_size);
            assert!(offset <= gen.max_offset());
            if let Some(prev) = previous {
                assert!(offset > prev);
            }
            previous = Some(offset);
        }
        assert_eq!(previous, Some(4_091_904));
    }

    #[test]
    fn test_random_offsets_aligned_and_bounded() {
        let block_size = 512;
        let file_size = 512 * 77 + 300; // partial trailing block is never addressed
        let mut gen = OffsetGenerator::new(AccessPattern::RandomWrite, block_size, file_size, 7);

        assert_eq!(gen.num_blocks(), 77);
        for i in 0..10_000 {
            let offset = gen.offset(i);
            assert_eq!(offset % block_size, 0);
            assert!(offset <= file_size - block_size);
            assert!(offset <= gen.max_offset());
        }
    }

    #[test]
    fn test_random_uses_whole_file_not_op_count() {
        // 10 operations over a 1000-block file must be able to land past block 10
        let mut gen = OffsetGenerator::new(AccessPattern::RandomRead, 4096, 4096 * 1000, 3);
        let max = (0..1000).map(|i| gen.offset(i)).max().unwrap();
        assert!(max >= 4096 * 10);
    }

    #[test]
    fn test_same_seed_same_offsets() {
        let mut a = OffsetGenerator::new(AccessPattern::RandomRead, 4096, 1 << 30, 99);
        let mut b = OffsetGenerator::new(AccessPattern::RandomRead, 4096, 1 << 30, 99);
        for i in 0..100 {
            assert_eq!(a.offset(i), b.offset(i));
        }
    }

    #[test]
    fn test_from_config_seeded() {
        let mut config = Config::new("/tmp", AccessPattern::RandomRead);
        config.seed = Some(5);
        let mut a = OffsetGenerator::from_config(&config);
        let mut b = OffsetGenerator::new(AccessPattern::RandomRead, 4096, 1 << 30, 5);
        assert_eq!(a.seed(), 5);
        assert_eq!(a.offset(0), b.offset(0));
    }
}
