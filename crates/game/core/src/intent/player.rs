//! Player-issued intents: menu choices, flips, pause/resume, reset.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::deck;
use crate::env::GameEnv;
use crate::intent::error::SessionError;
use crate::intent::{IntentResult, IntentTransition};
use crate::state::{CardId, Difficulty, GameState, GameStatus};

/// Sets the name recorded on the leaderboard for this session.
///
/// Only valid while idle so a finished game cannot be re-attributed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetPlayerNameIntent {
    pub name: String,
}

impl IntentTransition for SetPlayerNameIntent {
    type Error = SessionError;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        require_status(state, GameStatus::Idle)
    }

    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
    ) -> Result<IntentResult, Self::Error> {
        state.session.player_name = self.name.clone();
        Ok(IntentResult::NameSet)
    }
}

/// Selects the difficulty tier for the next game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetDifficultyIntent {
    pub difficulty: Difficulty,
}

impl IntentTransition for SetDifficultyIntent {
    type Error = SessionError;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        require_status(state, GameStatus::Idle)
    }

    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
    ) -> Result<IntentResult, Self::Error> {
        state.session.difficulty = self.difficulty;
        Ok(IntentResult::DifficultySet)
    }
}

/// Generates a fresh shuffled deck and transitions idle → playing.
///
/// The shuffle is seeded from `(game_seed, nonce)`, so a given state always
/// produces the same deck; variability across games comes from the nonce
/// advancing with every executed intent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StartGameIntent;

impl IntentTransition for StartGameIntent {
    type Error = SessionError;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        require_status(state, GameStatus::Idle)?;

        if state.session.player_name.trim().is_empty() {
            return Err(SessionError::PlayerNameEmpty);
        }

        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
    ) -> Result<IntentResult, Self::Error> {
        // The generator re-checks the pool size and is the single source of
        // the insufficient-images rejection.
        let mut rng = StdRng::seed_from_u64(state.shuffle_seed());
        let cards = deck::generate(state.session.difficulty, &state.pool, &mut rng)?;
        let card_count = cards.len();

        let session = &mut state.session;
        session.cards = cards;
        session.flipped.clear();
        session.matched.clear();
        session.moves = 0;
        session.score = 0;
        session.time_elapsed = 0;
        session.status = GameStatus::Playing;

        Ok(IntentResult::DeckGenerated { card_count })
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        debug_assert_eq!(
            state.session.cards.len(),
            state.session.difficulty.pair_count() * 2,
            "deck size must match the tier's pair count"
        );
        Ok(())
    }
}

/// Turns a card face up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlipCardIntent {
    pub card: CardId,
}

impl IntentTransition for FlipCardIntent {
    type Error = SessionError;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        require_status(state, GameStatus::Playing)?;

        let session = &state.session;
        if session.card(self.card).is_none() {
            return Err(SessionError::UnknownCard { card: self.card });
        }
        if session.is_matched(self.card) {
            return Err(SessionError::AlreadyMatched { card: self.card });
        }
        if session.is_face_up(self.card) {
            return Err(SessionError::AlreadyFlipped { card: self.card });
        }
        if session.flipped.len() >= GameConfig::MAX_FLIPPED {
            return Err(SessionError::FlipLimitReached);
        }

        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
    ) -> Result<IntentResult, Self::Error> {
        state.session.flipped.push(self.card);

        Ok(IntentResult::CardFlipped {
            card: self.card,
            pending_evaluation: state.session.flipped.len() == GameConfig::MAX_FLIPPED,
        })
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        debug_assert!(
            state.session.flipped.len() <= GameConfig::MAX_FLIPPED,
            "flipped set must never exceed the flip limit"
        );
        Ok(())
    }
}

/// Suspends the session; the clock stops until resume.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PauseIntent;

impl IntentTransition for PauseIntent {
    type Error = SessionError;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        require_status(state, GameStatus::Playing)
    }

    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
    ) -> Result<IntentResult, Self::Error> {
        state.session.status = GameStatus::Paused;
        Ok(IntentResult::Paused)
    }
}

/// Resumes a paused session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResumeIntent;

impl IntentTransition for ResumeIntent {
    type Error = SessionError;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        require_status(state, GameStatus::Paused)
    }

    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
    ) -> Result<IntentResult, Self::Error> {
        state.session.status = GameStatus::Playing;
        Ok(IntentResult::Resumed)
    }
}

/// Discards the current session and returns to idle.
///
/// Valid from any status; pool and leaderboard are untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResetIntent;

impl IntentTransition for ResetIntent {
    type Error = SessionError;

    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
    ) -> Result<IntentResult, Self::Error> {
        state.session.clear_board();
        Ok(IntentResult::SessionReset)
    }
}

fn require_status(state: &GameState, expected: GameStatus) -> Result<(), SessionError> {
    let actual = state.session.status;
    if actual != expected {
        return Err(SessionError::wrong_status(expected, actual));
    }
    Ok(())
}
