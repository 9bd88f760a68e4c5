//! Scheduler-issued intents.
//!
//! These are never dispatched by clients directly: the runtime's session
//! worker fires them from its timers (reveal delay, mismatch window, clock
//! tick) and on the completion transition. Keeping them as plain intents
//! means timing policy lives entirely outside the state machine and the
//! whole flow can be unit-tested without real delays.

use chrono::{DateTime, Utc};

use crate::env::GameEnv;
use crate::intent::error::SessionError;
use crate::intent::{IntentResult, IntentTransition};
use crate::state::{GameState, GameStatus, LeaderboardEntry};

/// Evaluates the two face-up cards once the reveal delay has elapsed.
///
/// Match: both cards move to the matched set, the flipped set clears, and
/// the move/score counters advance. The evaluation that matches the final
/// pair transitions the session to completed; since evaluation requires a
/// playing session, that transition can fire at most once per game.
///
/// Mismatch: only the move counter advances; the cards stay face up until
/// [`ClearFlippedIntent`] ends the reveal window.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvaluatePendingIntent;

impl IntentTransition for EvaluatePendingIntent {
    type Error = SessionError;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let actual = state.session.status;
        if actual != GameStatus::Playing {
            return Err(SessionError::wrong_status(GameStatus::Playing, actual));
        }

        let found = state.session.flipped.len();
        if found != 2 {
            return Err(SessionError::NothingToEvaluate { found });
        }

        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
    ) -> Result<IntentResult, Self::Error> {
        let (first, second) = match state.session.flipped[..] {
            [first, second] => (first, second),
            _ => {
                return Err(SessionError::NothingToEvaluate {
                    found: state.session.flipped.len(),
                });
            }
        };

        let first_pair = state
            .session
            .card(first)
            .ok_or(SessionError::UnknownCard { card: first })?
            .pair;
        let second_pair = state
            .session
            .card(second)
            .ok_or(SessionError::UnknownCard { card: second })?
            .pair;

        let session = &mut state.session;
        session.moves += 1;

        let matched = first_pair == second_pair;
        let mut completed = false;

        if matched {
            session.matched.insert(first);
            session.matched.insert(second);
            session.flipped.clear();
            session.score += env.config().score_per_match;

            if session.is_complete() {
                session.status = GameStatus::Completed;
                completed = true;
            }
        }

        Ok(IntentResult::MatchResolved {
            first,
            second,
            matched,
            completed,
        })
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        debug_assert!(
            state.session.flipped.is_empty() || state.session.flipped.len() == 2,
            "evaluation leaves either no face-up cards or the mismatched pair"
        );
        Ok(())
    }
}

/// Turns a mismatched pair face down at the end of the reveal window.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClearFlippedIntent;

impl IntentTransition for ClearFlippedIntent {
    type Error = SessionError;

    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
    ) -> Result<IntentResult, Self::Error> {
        state.session.flipped.clear();
        Ok(IntentResult::FlippedCleared)
    }
}

/// Advances the session clock by one second.
///
/// Only valid while playing; the worker simply skips ticks in every other
/// status, which is what freezes the clock across pause and completion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdvanceClockIntent;

impl IntentTransition for AdvanceClockIntent {
    type Error = SessionError;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let actual = state.session.status;
        if actual != GameStatus::Playing {
            return Err(SessionError::wrong_status(GameStatus::Playing, actual));
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
    ) -> Result<IntentResult, Self::Error> {
        state.session.time_elapsed += 1;
        Ok(IntentResult::ClockAdvanced {
            time_elapsed: state.session.time_elapsed,
        })
    }
}

/// Appends the completed session's result to the leaderboard.
///
/// The timestamp is supplied by the caller so the state machine never reads
/// a wall clock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordResultIntent {
    pub recorded_at: DateTime<Utc>,
}

impl IntentTransition for RecordResultIntent {
    type Error = SessionError;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let actual = state.session.status;
        if actual != GameStatus::Completed {
            return Err(SessionError::wrong_status(GameStatus::Completed, actual));
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
    ) -> Result<IntentResult, Self::Error> {
        let id = state.allocate_entry_id();
        let session = &state.session;
        let entry = LeaderboardEntry {
            id,
            name: session.player_name.clone(),
            score: session.score,
            moves: session.moves,
            time: session.time_elapsed,
            recorded_at: self.recorded_at,
        };

        state
            .leaderboard
            .record(entry.clone(), env.config().leaderboard_capacity);

        Ok(IntentResult::ResultRecorded(entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::intent::player::{FlipCardIntent, StartGameIntent};
    use crate::state::{CardId, Difficulty, ImageId, ImagePool, ImageRecord, Leaderboard, PairId};

    fn started_state() -> GameState {
        let mut pool = ImagePool::empty();
        for id in 1..=6 {
            pool.insert(ImageRecord {
                id: ImageId(id),
                url: format!("https://img.example/{id}"),
                difficulty: Difficulty::Easy,
            });
        }
        let mut state = GameState::with_seed(23, pool, Leaderboard::new());
        state.session.player_name = "Robin".into();
        let config = GameConfig::default();
        StartGameIntent
            .apply(&mut state, &GameEnv::new(&config))
            .unwrap();
        state
    }

    /// Two card ids sharing the given pair id, in deck order.
    fn cards_of_pair(state: &GameState, pair: PairId) -> (CardId, CardId) {
        let ids: Vec<_> = state
            .session
            .cards
            .iter()
            .filter(|card| card.pair == pair)
            .map(|card| card.id)
            .collect();
        (ids[0], ids[1])
    }

    fn mismatched_cards(state: &GameState) -> (CardId, CardId) {
        let first = state.session.cards[0].clone();
        let second = state
            .session
            .cards
            .iter()
            .find(|card| card.pair != first.pair)
            .unwrap();
        (first.id, second.id)
    }

    fn flip_both(state: &mut GameState, env: &GameEnv<'_>, first: CardId, second: CardId) {
        FlipCardIntent { card: first }.apply(state, env).unwrap();
        FlipCardIntent { card: second }.apply(state, env).unwrap();
    }

    #[test]
    fn matching_pair_scores_and_clears() {
        let mut state = started_state();
        let config = GameConfig::default();
        let env = GameEnv::new(&config);
        let (first, second) = cards_of_pair(&state, PairId(0));
        flip_both(&mut state, &env, first, second);

        let result = EvaluatePendingIntent.apply(&mut state, &env).unwrap();

        assert_eq!(
            result,
            IntentResult::MatchResolved { first, second, matched: true, completed: false }
        );
        assert!(state.session.matched.contains(&first));
        assert!(state.session.matched.contains(&second));
        assert!(state.session.flipped.is_empty());
        assert_eq!(state.session.moves, 1);
        assert_eq!(state.session.score, 100);
    }

    #[test]
    fn mismatch_counts_a_move_and_keeps_cards_up() {
        let mut state = started_state();
        let config = GameConfig::default();
        let env = GameEnv::new(&config);
        let (first, second) = mismatched_cards(&state);
        flip_both(&mut state, &env, first, second);

        let result = EvaluatePendingIntent.apply(&mut state, &env).unwrap();

        assert_eq!(
            result,
            IntentResult::MatchResolved { first, second, matched: false, completed: false }
        );
        assert!(state.session.matched.is_empty());
        assert_eq!(state.session.flipped, vec![first, second]);
        assert_eq!(state.session.moves, 1);
        assert_eq!(state.session.score, 0);

        let cleared = ClearFlippedIntent.apply(&mut state, &env).unwrap();
        assert_eq!(cleared, IntentResult::FlippedCleared);
        assert!(state.session.flipped.is_empty());
    }

    #[test]
    fn evaluation_requires_exactly_two_cards() {
        let mut state = started_state();
        let config = GameConfig::default();
        let env = GameEnv::new(&config);

        assert_eq!(
            EvaluatePendingIntent.pre_validate(&state, &env),
            Err(SessionError::NothingToEvaluate { found: 0 })
        );

        FlipCardIntent { card: state.session.cards[0].id }
            .apply(&mut state, &env)
            .unwrap();
        assert_eq!(
            EvaluatePendingIntent.pre_validate(&state, &env),
            Err(SessionError::NothingToEvaluate { found: 1 })
        );
    }

    #[test]
    fn final_pair_completes_the_session() {
        let mut state = started_state();
        let config = GameConfig::default();
        let env = GameEnv::new(&config);

        let mut last = None;
        for pair in 0..6 {
            let (first, second) = cards_of_pair(&state, PairId(pair));
            flip_both(&mut state, &env, first, second);
            last = Some(EvaluatePendingIntent.apply(&mut state, &env).unwrap());
        }

        assert!(matches!(
            last,
            Some(IntentResult::MatchResolved { matched: true, completed: true, .. })
        ));
        assert_eq!(state.session.status, GameStatus::Completed);
        assert_eq!(state.session.moves, 6);
        assert_eq!(state.session.score, 600);

        // The session is no longer playing, so a stray re-evaluation is
        // rejected instead of completing twice.
        assert!(matches!(
            EvaluatePendingIntent.pre_validate(&state, &env),
            Err(SessionError::WrongStatus { .. })
        ));
    }

    #[test]
    fn clock_only_advances_while_playing() {
        let mut state = started_state();
        let config = GameConfig::default();
        let env = GameEnv::new(&config);

        AdvanceClockIntent.pre_validate(&state, &env).unwrap();
        AdvanceClockIntent.apply(&mut state, &env).unwrap();
        assert_eq!(state.session.time_elapsed, 1);

        state.session.status = GameStatus::Paused;
        assert!(matches!(
            AdvanceClockIntent.pre_validate(&state, &env),
            Err(SessionError::WrongStatus { .. })
        ));
        assert_eq!(state.session.time_elapsed, 1);
    }

    #[test]
    fn record_result_captures_the_session_outcome() {
        let mut state = started_state();
        let config = GameConfig::default();
        let env = GameEnv::new(&config);

        for pair in 0..6 {
            let (first, second) = cards_of_pair(&state, PairId(pair));
            flip_both(&mut state, &env, first, second);
            EvaluatePendingIntent.apply(&mut state, &env).unwrap();
        }
        state.session.time_elapsed = 42;

        let recorded_at = DateTime::<Utc>::UNIX_EPOCH;
        let result = RecordResultIntent { recorded_at }
            .apply(&mut state, &env)
            .unwrap();

        let IntentResult::ResultRecorded(entry) = result else {
            panic!("expected a recorded entry");
        };
        assert_eq!(entry.name, "Robin");
        assert_eq!(entry.score, 600);
        assert_eq!(entry.moves, 6);
        assert_eq!(entry.time, 42);
        assert_eq!(state.leaderboard.len(), 1);
    }

    #[test]
    fn record_result_requires_a_completed_session() {
        let mut state = started_state();
        let config = GameConfig::default();
        let env = GameEnv::new(&config);

        let result = RecordResultIntent { recorded_at: DateTime::<Utc>::UNIX_EPOCH }
            .pre_validate(&state, &env);

        assert_eq!(
            result,
            Err(SessionError::WrongStatus {
                expected: GameStatus::Completed,
                actual: GameStatus::Playing,
            })
        );
    }
}
