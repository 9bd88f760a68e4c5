//! Deterministic rules for the memory-matching card game.
//!
//! `game-core` defines the canonical data model (session, image pool,
//! leaderboard) and exposes pure APIs reused by the runtime and offline
//! tools. All state mutation flows through [`engine::GameEngine`]; the crate
//! performs no I/O and holds no clocks, so every transition is replayable
//! from `(game_seed, nonce)`.
pub mod config;
pub mod deck;
pub mod engine;
pub mod env;
pub mod intent;
pub mod state;

pub use config::GameConfig;
pub use deck::DeckError;
pub use engine::{ExecuteError, ExecutionOutcome, GameEngine, TransitionPhase, TransitionPhaseError};
pub use env::GameEnv;
pub use intent::{
    AddImageIntent, AdminIntent, AdvanceClockIntent, ClearFlippedIntent, EvaluatePendingIntent,
    FlipCardIntent, Intent, IntentResult, IntentTransition, MoveImageIntent, PauseIntent,
    PlayerIntent, RecordResultIntent, RemoveImageIntent, ResetIntent, ResumeIntent,
    SessionError, SetDifficultyIntent, SetPlayerNameIntent, StartGameIntent, SystemIntent,
};
pub use state::{
    Card, CardId, Difficulty, EntryId, GameState, GameStatus, ImageId, ImagePool, ImageRecord,
    Leaderboard, LeaderboardEntry, PairId, PoolError, SessionState, StateDelta,
};
