//! Error types for session-facing intents.

use thiserror::Error;

use crate::deck::DeckError;
use crate::state::{CardId, GameStatus};

/// Errors raised by player and scheduler intents against the session.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionError {
    #[error("operation requires {expected} status, session is {actual}")]
    WrongStatus {
        expected: GameStatus,
        actual: GameStatus,
    },

    #[error("player name must be set before starting a game")]
    PlayerNameEmpty,

    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error("card {card} is not part of the current deck")]
    UnknownCard { card: CardId },

    #[error("card {card} is already face up")]
    AlreadyFlipped { card: CardId },

    #[error("card {card} is already matched")]
    AlreadyMatched { card: CardId },

    #[error("two cards are already face up awaiting evaluation")]
    FlipLimitReached,

    #[error("match evaluation requires exactly two face-up cards, found {found}")]
    NothingToEvaluate { found: usize },
}

impl SessionError {
    pub(crate) fn wrong_status(expected: GameStatus, actual: GameStatus) -> Self {
        Self::WrongStatus { expected, actual }
    }
}
