//! Transient per-game session state.
//!
//! A session is created at game start, mutated during play, and discarded on
//! reset. Nothing here is persisted; the leaderboard captures the outcome of
//! a completed session.

use std::collections::BTreeSet;

use crate::state::common::{CardId, Difficulty, GameStatus, PairId};

/// One face of the board. Generated fresh per session by [`crate::deck`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    pub id: CardId,
    /// URL of the image shown when the card is face up.
    pub image: String,
    /// Exactly two cards of a deck share each pair id.
    pub pair: PairId,
}

/// Live state of a single game session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionState {
    /// Shuffled deck, empty while idle.
    pub cards: Vec<Card>,
    /// Face-up cards awaiting evaluation, in flip order. Never more than two.
    pub flipped: Vec<CardId>,
    /// Cards already cleared from play.
    pub matched: BTreeSet<CardId>,
    /// Evaluated pairs, both successful and failed.
    pub moves: u32,
    pub score: u32,
    /// Whole seconds while the session is playing; frozen otherwise.
    pub time_elapsed: u64,
    pub status: GameStatus,
    pub difficulty: Difficulty,
    pub player_name: String,
}

impl SessionState {
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn is_face_up(&self, id: CardId) -> bool {
        self.flipped.contains(&id)
    }

    pub fn is_matched(&self, id: CardId) -> bool {
        self.matched.contains(&id)
    }

    /// True once every card of a non-empty deck has been matched.
    pub fn is_complete(&self) -> bool {
        !self.cards.is_empty() && self.matched.len() == self.cards.len()
    }

    /// Discards the board and counters, returning to idle. Player name and
    /// selected difficulty survive so a replay can start immediately.
    pub fn clear_board(&mut self) {
        self.cards.clear();
        self.flipped.clear();
        self.matched.clear();
        self.moves = 0;
        self.score = 0;
        self.time_elapsed = 0;
        self.status = GameStatus::Idle;
    }
}
