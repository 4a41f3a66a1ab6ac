//! Engine error type.
//!
//! Every failure the engine reports is local and recoverable: the caller
//! gets a `GameError` back and the game state is left untouched.

use thiserror::Error;

use super::player::{Money, PlayerId};

/// Errors reported by the rules engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// A tile index outside the board.
    #[error("tile index {index} out of range for a board of {len} tiles")]
    OutOfRange { index: usize, len: usize },

    /// A purchase the player cannot pay for.
    #[error("{player} cannot afford {cost} (has {money})")]
    InsufficientFunds {
        player: PlayerId,
        cost: Money,
        money: Money,
    },

    /// An operation that is not valid in the current phase of play.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A player id that is not part of the roster.
    #[error("{0} not found")]
    NotFound(PlayerId),

    /// Rejected session configuration or board layout.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GameError {
    pub(crate) fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub(crate) fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, GameError>;
