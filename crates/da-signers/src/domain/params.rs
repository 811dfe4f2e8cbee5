//! # Module Parameters
//!
//! Governance-controlled tunables.

use super::errors::{DaSignersResult, ValidationError};
use serde::{Deserialize, Serialize};

/// Default bonded tokens per vote.
pub const DEFAULT_TOKENS_PER_VOTE: u64 = 10;

/// Default vote cap per signer.
pub const DEFAULT_MAX_VOTES_PER_SIGNER: u64 = 1024;

/// Default cap on concurrently active quorums.
pub const DEFAULT_MAX_QUORUMS: u64 = 10;

/// Default epoch length in blocks (~8h at 5s blocks).
pub const DEFAULT_EPOCH_BLOCKS: u64 = 5760;

/// Default erasure-coding shard count.
pub const DEFAULT_ENCODED_SLICES: u64 = 3072;

/// Upper bound on `max_quorums`. Formation allocates every quorum up front
/// and ranks each signer across all of them.
pub const MAX_QUORUMS_LIMIT: u64 = 4096;

/// DA signers parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// Bonded-token amount that equals one vote.
    pub tokens_per_vote: u64,
    /// Cap on votes credited to any one signer.
    pub max_votes_per_signer: u64,
    /// Cap on concurrently active quorums.
    pub max_quorums: u64,
    /// Block interval between quorum recomputation.
    pub epoch_blocks: u64,
    /// Shard count consumed by downstream encoding.
    pub encoded_slices: u64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            tokens_per_vote: DEFAULT_TOKENS_PER_VOTE,
            max_votes_per_signer: DEFAULT_MAX_VOTES_PER_SIGNER,
            max_quorums: DEFAULT_MAX_QUORUMS,
            epoch_blocks: DEFAULT_EPOCH_BLOCKS,
            encoded_slices: DEFAULT_ENCODED_SLICES,
        }
    }
}

impl Params {
    /// Check that every field is positive and `max_quorums` is bounded.
    pub fn validate(&self) -> DaSignersResult<()> {
        let fields = [
            ("tokens_per_vote", self.tokens_per_vote),
            ("max_votes_per_signer", self.max_votes_per_signer),
            ("max_quorums", self.max_quorums),
            ("epoch_blocks", self.epoch_blocks),
            ("encoded_slices", self.encoded_slices),
        ];

        for (field, value) in fields {
            if value == 0 {
                return Err(ValidationError::InvalidParam {
                    field,
                    reason: "must be positive".to_string(),
                }
                .into());
            }
        }

        if self.max_quorums > MAX_QUORUMS_LIMIT {
            return Err(ValidationError::InvalidParam {
                field: "max_quorums",
                reason: format!("must not exceed {}", MAX_QUORUMS_LIMIT),
            }
            .into());
        }

        Ok(())
    }
}
