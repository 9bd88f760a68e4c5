//! Intent execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. Every
//! mutation (player moves, scheduler timers, admin edits) flows through the
//! same `execute()` path, which validates, applies, and reports what changed
//! so callers can persist and publish consistently.

mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use crate::env::GameEnv;
use crate::intent::{Intent, IntentResult};
use crate::state::{GameState, StateDelta};

/// Complete outcome of intent execution.
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutionOutcome {
    /// Which state slices changed (drives persistence and event routing).
    pub delta: StateDelta,

    /// Intent-specific execution payload.
    pub result: IntentResult,
}

/// Game engine that executes intents against a mutable state reference.
///
/// Execution is transactional: a rejected intent leaves the state exactly
/// as it was, so callers never observe a half-applied mutation.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine with the given state.
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Executes an intent by routing it through the transition pipeline.
    ///
    /// On success the state's nonce is incremented and the outcome carries
    /// the slice-level delta computed from before/after snapshots. On
    /// failure the pre-execution snapshot is restored.
    pub fn execute(
        &mut self,
        env: GameEnv<'_>,
        intent: &Intent,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        let before = self.state.clone();

        match transition::execute_transition(intent, self.state, &env) {
            Ok(result) => {
                self.state.nonce += 1;

                let delta = StateDelta::from_states(&before, self.state);
                Ok(ExecutionOutcome { delta, result })
            }
            Err(error) => {
                *self.state = before;
                Err(error)
            }
        }
    }
}
