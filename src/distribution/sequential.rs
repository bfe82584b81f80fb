//! Sequential block generation
//!
//! The i-th operation touches block `i`. The cursor never wraps: a validated
//! configuration guarantees `op_count <= num_blocks`.

use crate::distribution::Distribution;

/// Sequential block generator
///
/// Generates block numbers in sequential order: 0, 1, 2, 3, ...
#[derive(Debug, Default)]
pub struct SequentialDistribution;

impl SequentialDistribution {
    /// Create a new sequential distribution
    pub fn new() -> Self {
        Self
    }
}

impl Distribution for SequentialDistribution {
    #[inline(always)]
    fn next_block(&mut self, index: u64, num_blocks: u64) -> u64 {
        debug_assert!(index < num_blocks, "sequential index {} past {} blocks", index, num_blocks);
        index
    }
}
