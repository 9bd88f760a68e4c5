//! Routing from the intent union to the matching transition pipeline.

use crate::engine::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};
use crate::env::GameEnv;
use crate::intent::{AdminIntent, Intent, IntentResult, IntentTransition, PlayerIntent, SystemIntent};
use crate::state::GameState;

/// Dispatches the intent through its `pre_validate → apply → post_validate`
/// pipeline, tagging any failure with the originating intent and phase.
pub(crate) fn execute_transition(
    intent: &Intent,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<IntentResult, ExecuteError> {
    match intent {
        Intent::Player(intent) => match intent {
            PlayerIntent::SetPlayerName(i) => run(i, state, env).map_err(ExecuteError::SetPlayerName),
            PlayerIntent::SetDifficulty(i) => run(i, state, env).map_err(ExecuteError::SetDifficulty),
            PlayerIntent::StartGame(i) => run(i, state, env).map_err(ExecuteError::StartGame),
            PlayerIntent::FlipCard(i) => run(i, state, env).map_err(ExecuteError::FlipCard),
            PlayerIntent::Pause(i) => run(i, state, env).map_err(ExecuteError::Pause),
            PlayerIntent::Resume(i) => run(i, state, env).map_err(ExecuteError::Resume),
            PlayerIntent::Reset(i) => run(i, state, env).map_err(ExecuteError::Reset),
        },
        Intent::System(intent) => match intent {
            SystemIntent::EvaluatePending(i) => {
                run(i, state, env).map_err(ExecuteError::EvaluatePending)
            }
            SystemIntent::ClearFlipped(i) => run(i, state, env).map_err(ExecuteError::ClearFlipped),
            SystemIntent::AdvanceClock(i) => run(i, state, env).map_err(ExecuteError::AdvanceClock),
            SystemIntent::RecordResult(i) => run(i, state, env).map_err(ExecuteError::RecordResult),
        },
        Intent::Admin(intent) => match intent {
            AdminIntent::AddImage(i) => run(i, state, env).map_err(ExecuteError::AddImage),
            AdminIntent::RemoveImage(i) => run(i, state, env).map_err(ExecuteError::RemoveImage),
            AdminIntent::MoveImage(i) => run(i, state, env).map_err(ExecuteError::MoveImage),
        },
    }
}

fn run<T: IntentTransition>(
    transition: &T,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<IntentResult, TransitionPhaseError<T::Error>> {
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}
