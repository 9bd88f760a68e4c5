//! Error types for the intent execution pipeline.

use crate::intent::SessionError;
use crate::state::PoolError;

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing an intent through the game engine.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("set player name failed: {0}")]
    SetPlayerName(TransitionPhaseError<SessionError>),

    #[error("set difficulty failed: {0}")]
    SetDifficulty(TransitionPhaseError<SessionError>),

    #[error("start game failed: {0}")]
    StartGame(TransitionPhaseError<SessionError>),

    #[error("flip card failed: {0}")]
    FlipCard(TransitionPhaseError<SessionError>),

    #[error("pause failed: {0}")]
    Pause(TransitionPhaseError<SessionError>),

    #[error("resume failed: {0}")]
    Resume(TransitionPhaseError<SessionError>),

    #[error("reset failed: {0}")]
    Reset(TransitionPhaseError<SessionError>),

    #[error("evaluate pending failed: {0}")]
    EvaluatePending(TransitionPhaseError<SessionError>),

    #[error("clear flipped failed: {0}")]
    ClearFlipped(TransitionPhaseError<SessionError>),

    #[error("advance clock failed: {0}")]
    AdvanceClock(TransitionPhaseError<SessionError>),

    #[error("record result failed: {0}")]
    RecordResult(TransitionPhaseError<SessionError>),

    #[error("add image failed: {0}")]
    AddImage(TransitionPhaseError<PoolError>),

    #[error("remove image failed: {0}")]
    RemoveImage(TransitionPhaseError<PoolError>),

    #[error("move image failed: {0}")]
    MoveImage(TransitionPhaseError<PoolError>),
}

impl ExecuteError {
    /// The pipeline stage that rejected the intent. Pre-validate rejections
    /// are expected traffic; apply/post-validate failures are worth louder
    /// logging.
    pub fn phase(&self) -> TransitionPhase {
        match self {
            ExecuteError::SetPlayerName(e)
            | ExecuteError::SetDifficulty(e)
            | ExecuteError::StartGame(e)
            | ExecuteError::FlipCard(e)
            | ExecuteError::Pause(e)
            | ExecuteError::Resume(e)
            | ExecuteError::Reset(e)
            | ExecuteError::EvaluatePending(e)
            | ExecuteError::ClearFlipped(e)
            | ExecuteError::AdvanceClock(e)
            | ExecuteError::RecordResult(e) => e.phase,
            ExecuteError::AddImage(e)
            | ExecuteError::RemoveImage(e)
            | ExecuteError::MoveImage(e) => e.phase,
        }
    }
}
