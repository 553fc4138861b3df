//! Error types for the engine.
//!
//! Unknown ids and unaffordable purchases are not errors at the core level
//! (lookups return `Option`, purchases a [`crate::PurchaseOutcome`]); these
//! types cover the phase-gated command layer, snapshot loading and config.

use crate::types::{PerkId, PersonId, Phase, TaskId};

/// Rejected command on a [`crate::Game`]. The game state is untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error("unknown person: {0}")]
    UnknownPerson(PersonId),

    #[error("unknown task: {0}")]
    UnknownTask(TaskId),

    #[error("command needs the {expected} phase, game is in {actual}")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("task slot {slot} already ran, next slot is {next}")]
    SlotAlreadyRun { slot: usize, next: usize },

    /// The day could not advance; carries the game-over reason
    #[error("house is no longer viable: {0}")]
    NotViable(String),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Fatal problem with a save snapshot. Nothing is loaded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot has {len} entries, the header alone needs {min}")]
    TooShort { len: usize, min: usize },

    #[error("negative day number: {0}")]
    NegativeDay(i32),

    #[error("negative bought-perk count: {0}")]
    NegativePerkCount(i32),

    #[error("snapshot declares {declared} bought perks but has {len} entries (expected {expected})")]
    LengthMismatch {
        declared: usize,
        len: usize,
        expected: usize,
    },

    #[error("unknown weather condition code: {0}")]
    UnknownSkyCondition(i32),

    #[error("unknown perk id: {0}")]
    UnknownPerk(i32),

    #[error("perk {0} is not available for replay (bought twice or superseded)")]
    PerkNotAvailable(PerkId),

    /// Money, energy or day no longer fits a snapshot cell
    #[error("{field} = {value} does not fit in a snapshot")]
    ValueOutOfRange { field: &'static str, value: i64 },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
