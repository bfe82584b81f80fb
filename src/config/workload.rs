//! Workload definition structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Access pattern of a benchmark run
///
/// Exactly one pattern is used for the whole run. Whether the pattern reads or
/// writes, and whether its offsets are sequential or random, are derived from the
/// variant through [`AccessPattern::is_write`] and [`AccessPattern::is_random`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AccessPattern {
    #[serde(alias = "sread")]
    SequentialRead,
    #[serde(alias = "swrite")]
    SequentialWrite,
    #[serde(alias = "rread")]
    RandomRead,
    #[serde(alias = "rwrite")]
    RandomWrite,
}

impl AccessPattern {
    /// All patterns, in CLI flag order
    pub const ALL: [AccessPattern; 4] = [
        AccessPattern::RandomRead,
        AccessPattern::RandomWrite,
        AccessPattern::SequentialRead,
        AccessPattern::SequentialWrite,
    ];

    /// Whether operations of this pattern are writes
    #[inline]
    pub fn is_write(self) -> bool {
        match self {
            AccessPattern::SequentialWrite | AccessPattern::RandomWrite => true,
            AccessPattern::SequentialRead | AccessPattern::RandomRead => false,
        }
    }

    /// Whether offsets of this pattern are drawn at random
    #[inline]
    pub fn is_random(self) -> bool {
        match self {
            AccessPattern::RandomRead | AccessPattern::RandomWrite => true,
            AccessPattern::SequentialRead | AccessPattern::SequentialWrite => false,
        }
    }

    /// Two-letter code used in the `io_type` column of the I/O log
    pub fn abbrev(self) -> &'static str {
        match self {
            AccessPattern::RandomRead => "RR",
            AccessPattern::RandomWrite => "RW",
            AccessPattern::SequentialRead => "SR",
            AccessPattern::SequentialWrite => "SW",
        }
    }

    /// Inverse of [`AccessPattern::abbrev`]
    pub fn from_abbrev(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.abbrev() == code)
    }
}

impl fmt::Display for AccessPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AccessPattern::RandomRead => "Random read",
            AccessPattern::RandomWrite => "Random write",
            AccessPattern::SequentialRead => "Sequential read",
            AccessPattern::SequentialWrite => "Sequential write",
        };
        write!(f, "{}", s)
    }
}
