use crate::types::{Money, Rank};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid deposit amount: must be a positive number")]
    InvalidAmount,

    #[error("Invalid goal: must be a number of at least ${min:.0}")]
    InvalidGoal { min: Money },

    #[error("No savings goal set: complete onboarding before depositing")]
    GoalNotSet,

    #[error("Goal already set: onboarding is only available at rank 0")]
    GoalAlreadySet,

    #[error("Rank {rank} is outside the rank table")]
    OutOfRange { rank: Rank },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
