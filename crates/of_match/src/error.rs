use thiserror::Error;

use crate::models::{PlayerId, TeamSide};

/// Malformed input rejected before kickoff. No engine state exists yet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{side} lineup must have exactly {expected} starters, found {found}")]
    StarterCount { side: TeamSide, expected: usize, found: usize },

    #[error("{side} lineup has no nominated goalkeeper")]
    MissingGoalkeeper { side: TeamSide },

    #[error("{side} lineup lists player {id} more than once")]
    DuplicatePlayer { side: TeamSide, id: PlayerId },

    #[error("player {id} appears in both squads")]
    PlayerInBothSquads { id: PlayerId },
}

/// Operation not allowed in the engine's current phase.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("match already finished at minute {minute}")]
    MatchFinished { minute: u8 },
}

#[derive(Error, Debug)]
pub enum MatchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error("Unsupported schema version: {0}")]
    UnsupportedSchema(u8),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MatchError {
    /// Whether the caller could retry with corrected input.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            MatchError::Validation(_)
                | MatchError::UnsupportedSchema(_)
                | MatchError::InvalidRequest(_)
                | MatchError::Json(_)
                | MatchError::Config(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
