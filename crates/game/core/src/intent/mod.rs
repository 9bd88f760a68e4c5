//! Intent domain - the typed dispatch surface of the game.
//!
//! Every state mutation is expressed as an intent struct implementing
//! [`IntentTransition`]; the engine routes a tagged [`Intent`] union through
//! the matching pipeline with compile-time exhaustiveness. Intents come in
//! three flavors:
//!
//! - `Player`: issued by the UI on behalf of the player (menu choices,
//!   flips, pause/resume, reset).
//! - `System`: issued by the runtime scheduler (match evaluation after the
//!   reveal delay, mismatch clear, clock ticks, leaderboard recording).
//! - `Admin`: image pool curation.

pub mod admin;
pub mod error;
pub mod player;
pub mod system;

pub use admin::{AddImageIntent, MoveImageIntent, RemoveImageIntent};
pub use error::SessionError;
pub use player::{
    FlipCardIntent, PauseIntent, ResetIntent, ResumeIntent, SetDifficultyIntent,
    SetPlayerNameIntent, StartGameIntent,
};
pub use system::{
    AdvanceClockIntent, ClearFlippedIntent, EvaluatePendingIntent, RecordResultIntent,
};

use crate::env::GameEnv;
use crate::state::{CardId, GameState, ImageId, ImageRecord, LeaderboardEntry};

/// Defines how a concrete intent variant mutates game state.
///
/// Implementors can override the validation hooks to surface pre- and
/// post-conditions that must hold around the state mutation. Validation
/// failures reject the intent without any state change.
pub trait IntentTransition {
    type Error;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the intent by mutating the game state directly.
    /// Implementations should assume that `pre_validate` has already run
    /// successfully.
    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>)
    -> Result<IntentResult, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Intent-specific execution payload returned alongside the state delta.
#[derive(Clone, Debug, PartialEq)]
pub enum IntentResult {
    NameSet,
    DifficultySet,
    DeckGenerated {
        card_count: usize,
    },
    CardFlipped {
        card: CardId,
        /// True when this flip left two cards face up, i.e. the scheduler
        /// should arm the reveal-delay evaluation.
        pending_evaluation: bool,
    },
    MatchResolved {
        first: CardId,
        second: CardId,
        matched: bool,
        /// True when this evaluation matched the final pair.
        completed: bool,
    },
    FlippedCleared,
    ClockAdvanced {
        time_elapsed: u64,
    },
    Paused,
    Resumed,
    SessionReset,
    ImageAdded(ImageRecord),
    ImageRemoved {
        id: ImageId,
    },
    ImageMoved {
        id: ImageId,
        /// False when the id was absent from the source tier (silent no-op).
        moved: bool,
    },
    ResultRecorded(LeaderboardEntry),
}

/// Player-issued intent variants.
#[derive(Clone, Debug, PartialEq)]
pub enum PlayerIntent {
    SetPlayerName(SetPlayerNameIntent),
    SetDifficulty(SetDifficultyIntent),
    StartGame(StartGameIntent),
    FlipCard(FlipCardIntent),
    Pause(PauseIntent),
    Resume(ResumeIntent),
    Reset(ResetIntent),
}

/// Scheduler-issued intent variants (reveal evaluation, timers, recording).
#[derive(Clone, Debug, PartialEq)]
pub enum SystemIntent {
    EvaluatePending(EvaluatePendingIntent),
    ClearFlipped(ClearFlippedIntent),
    AdvanceClock(AdvanceClockIntent),
    RecordResult(RecordResultIntent),
}

/// Admin intent variants for image pool curation.
#[derive(Clone, Debug, PartialEq)]
pub enum AdminIntent {
    AddImage(AddImageIntent),
    RemoveImage(RemoveImageIntent),
    MoveImage(MoveImageIntent),
}

/// Top-level intent union accepted by the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    Player(PlayerIntent),
    System(SystemIntent),
    Admin(AdminIntent),
}

impl Intent {
    /// Returns the snake_case name of the intent, used for logging and
    /// event labels.
    pub fn as_snake_case(&self) -> &'static str {
        match self {
            Intent::Player(intent) => match intent {
                PlayerIntent::SetPlayerName(_) => "set_player_name",
                PlayerIntent::SetDifficulty(_) => "set_difficulty",
                PlayerIntent::StartGame(_) => "start_game",
                PlayerIntent::FlipCard(_) => "flip_card",
                PlayerIntent::Pause(_) => "pause",
                PlayerIntent::Resume(_) => "resume",
                PlayerIntent::Reset(_) => "reset",
            },
            Intent::System(intent) => match intent {
                SystemIntent::EvaluatePending(_) => "evaluate_pending",
                SystemIntent::ClearFlipped(_) => "clear_flipped",
                SystemIntent::AdvanceClock(_) => "advance_clock",
                SystemIntent::RecordResult(_) => "record_result",
            },
            Intent::Admin(intent) => match intent {
                AdminIntent::AddImage(_) => "add_image",
                AdminIntent::RemoveImage(_) => "remove_image",
                AdminIntent::MoveImage(_) => "move_image",
            },
        }
    }
}

impl From<PlayerIntent> for Intent {
    fn from(intent: PlayerIntent) -> Self {
        Self::Player(intent)
    }
}

impl From<SystemIntent> for Intent {
    fn from(intent: SystemIntent) -> Self {
        Self::System(intent)
    }
}

impl From<AdminIntent> for Intent {
    fn from(intent: AdminIntent) -> Self {
        Self::Admin(intent)
    }
}
