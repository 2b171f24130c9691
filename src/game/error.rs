//! Error kinds reported by game operations
//!
//! Every variant is recoverable: callers surface it as a message and keep playing.

use crate::progression::PersistenceError;
use thiserror::Error;

/// Why a guess was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidGuess {
    #[error("not enough letters")]
    TooShort,
    #[error("too many letters")]
    TooLong,
    #[error("not in word list")]
    NotInDictionary,
}

/// Errors from session, booster and progression operations
#[derive(Debug, Error)]
pub enum GameError {
    #[error("not enough coins: need {needed}, have {available}")]
    InsufficientFunds { needed: u32, available: u32 },

    #[error("invalid guess: {0}")]
    InvalidGuess(#[from] InvalidGuess),

    #[error("every position is already revealed")]
    NoAvailablePosition,

    #[error("no level is in play")]
    SessionNotPlaying,

    #[error("the level is still in play")]
    SessionNotTerminal,

    #[error("the level is already won")]
    LevelAlreadyWon,

    #[error("progress could not be saved: {0}")]
    Persistence(#[from] PersistenceError),
}

impl GameError {
    /// Check a balance against a cost
    ///
    /// # Errors
    /// `InsufficientFunds` when `coins < cost`.
    pub fn ensure_funds(coins: u32, cost: u32) -> Result<u32, Self> {
        coins.checked_sub(cost).ok_or(Self::InsufficientFunds {
            needed: cost,
            available: coins,
        })
    }
}
