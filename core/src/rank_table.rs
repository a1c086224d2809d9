//! The rank table — the fixed, ordered progression ladder.
//!
//! RULE: tiers are validated once at load and never mutated. Every rank
//! lookup inside the engine goes through tier_at(); an OutOfRange there
//! means a catalog/engine mismatch, not a user error.

use crate::config::RankTier;
use crate::error::{EngineError, EngineResult};
use crate::types::Rank;

#[derive(Debug, Clone)]
pub struct RankTable {
    tiers: Vec<RankTier>,
}

impl RankTable {
    /// Validate and seal a tier list. Ranks must be contiguous from 0,
    /// rank 0 must be the zero-threshold onboarding tier, and thresholds
    /// must be non-decreasing.
    pub fn new(tiers: Vec<RankTier>) -> anyhow::Result<Self> {
        anyhow::ensure!(!tiers.is_empty(), "rank table must not be empty");
        for (i, tier) in tiers.iter().enumerate() {
            anyhow::ensure!(
                tier.rank == i,
                "rank table must be contiguous from 0: position {i} holds rank {}",
                tier.rank
            );
        }
        anyhow::ensure!(
            tiers[0].threshold == 0.0,
            "rank 0 must have threshold 0, got {}",
            tiers[0].threshold
        );
        for pair in tiers.windows(2) {
            anyhow::ensure!(
                pair[0].threshold <= pair[1].threshold,
                "thresholds must be non-decreasing: rank {} has {}, rank {} has {}",
                pair[0].rank,
                pair[0].threshold,
                pair[1].rank,
                pair[1].threshold
            );
        }
        Ok(Self { tiers })
    }

    pub fn tier_at(&self, rank: Rank) -> EngineResult<&RankTier> {
        self.tiers.get(rank).ok_or(EngineError::OutOfRange { rank })
    }

    pub fn max_rank(&self) -> Rank {
        self.tiers.len() - 1
    }
}
