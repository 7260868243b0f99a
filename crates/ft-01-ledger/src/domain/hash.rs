//! Transaction hash and synthetic block number generation.

use super::entities::{Timestamp, TxHash};
use crate::ports::outbound::EntropySource;
use std::ops::Range;

/// Default synthetic block range, `[1000, 11000)`.
pub const DEFAULT_BLOCK_RANGE: Range<u64> = 1_000..11_000;

/// Produces hashes and block numbers for new records.
///
/// Hashes carry 32 bits of randomness plus the submission timestamp, so two
/// submissions in the same millisecond collide with probability 2^-32. The
/// store rejects collisions; the service retries with a fresh hash.
#[derive(Debug, Clone)]
pub struct HashGenerator {
    block_range: Range<u64>,
}

impl Default for HashGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_RANGE)
    }
}

impl HashGenerator {
    pub fn new(block_range: Range<u64>) -> Self {
        Self { block_range }
    }

    pub fn block_range(&self) -> Range<u64> {
        self.block_range.clone()
    }

    pub fn next_hash(&self, entropy: &dyn EntropySource, timestamp: Timestamp) -> TxHash {
        TxHash::from_parts(entropy.next_u32(), timestamp)
    }

    /// Uniform in the configured half-open range.
    pub fn next_block(&self, entropy: &dyn EntropySource) -> u64 {
        entropy.next_in_range(self.block_range.clone())
    }
}
