//! Broadcast event stream published by the session worker.
//!
//! Events are notifications, not the source of truth: UI layers re-render
//! from [`game_core::GameState`] via `query_state` and use events to know
//! when to do so.

use game_core::{CardId, Difficulty, GameStatus, LeaderboardEntry};

/// Events published after each state change.
#[derive(Clone, Debug)]
pub enum GameEvent {
    /// A deck was generated and the session entered playing.
    SessionStarted {
        difficulty: Difficulty,
        card_count: usize,
    },
    CardFlipped {
        card: CardId,
        /// True when the reveal-delay evaluation was armed by this flip.
        pending_evaluation: bool,
    },
    MatchResolved {
        first: CardId,
        second: CardId,
        matched: bool,
    },
    /// A mismatched pair was turned face down again.
    FlippedCleared,
    ClockAdvanced {
        time_elapsed: u64,
    },
    StatusChanged {
        status: GameStatus,
    },
    /// The session completed and its result was appended to the leaderboard.
    SessionCompleted {
        entry: LeaderboardEntry,
    },
    SessionReset,
    /// The image pool changed (add/remove/move).
    PoolUpdated,
    LeaderboardUpdated,
    /// An intent was rejected; the session state is unchanged.
    IntentRejected {
        intent: &'static str,
        reason: String,
    },
    /// A blob save failed; the session continues in memory.
    StorageFailure {
        reason: String,
    },
}
