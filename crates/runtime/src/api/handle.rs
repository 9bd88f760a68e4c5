//! Cloneable façade for issuing intents to the session worker.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers one async helper per
//! player and admin intent. Scheduler intents (evaluation, mismatch clear,
//! clock ticks, leaderboard recording) are deliberately not reachable from
//! here; the worker owns them.

use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{
    AddImageIntent, AdminIntent, CardId, Difficulty, ExecutionOutcome, FlipCardIntent, GameState,
    ImageId, ImageRecord, Intent, IntentResult, MoveImageIntent, PauseIntent, PlayerIntent,
    RemoveImageIntent, ResetIntent, ResumeIntent, SetDifficultyIntent, SetPlayerNameIntent,
    StartGameIntent,
};

use super::errors::{Result, RuntimeError};
use crate::events::GameEvent;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime.
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<GameEvent>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_tx: broadcast::Sender<GameEvent>,
    ) -> Self {
        Self {
            command_tx,
            event_tx,
        }
    }

    /// Sets the name the leaderboard will credit for this session.
    pub async fn set_player_name(&self, name: impl Into<String>) -> Result<()> {
        self.dispatch(PlayerIntent::SetPlayerName(SetPlayerNameIntent {
            name: name.into(),
        }))
        .await
        .map(drop)
    }

    /// Selects the difficulty tier for the next game.
    pub async fn set_difficulty(&self, difficulty: Difficulty) -> Result<()> {
        self.dispatch(PlayerIntent::SetDifficulty(SetDifficultyIntent { difficulty }))
            .await
            .map(drop)
    }

    /// Generates a deck and starts playing.
    pub async fn start_game(&self) -> Result<()> {
        self.dispatch(PlayerIntent::StartGame(StartGameIntent))
            .await
            .map(drop)
    }

    /// Turns a card face up.
    pub async fn flip_card(&self, card: CardId) -> Result<()> {
        self.dispatch(PlayerIntent::FlipCard(FlipCardIntent { card }))
            .await
            .map(drop)
    }

    pub async fn pause(&self) -> Result<()> {
        self.dispatch(PlayerIntent::Pause(PauseIntent)).await.map(drop)
    }

    pub async fn resume(&self) -> Result<()> {
        self.dispatch(PlayerIntent::Resume(ResumeIntent)).await.map(drop)
    }

    /// Discards the current session and returns to the menu state.
    pub async fn reset(&self) -> Result<()> {
        self.dispatch(PlayerIntent::Reset(ResetIntent)).await.map(drop)
    }

    /// Adds an image to a tier and returns the created record.
    ///
    /// The caller is responsible for having validated that the URL loads;
    /// the pool trusts its input.
    pub async fn add_image(
        &self,
        url: impl Into<String>,
        difficulty: Difficulty,
    ) -> Result<ImageRecord> {
        let outcome = self
            .dispatch(AdminIntent::AddImage(AddImageIntent {
                url: url.into(),
                difficulty,
            }))
            .await?;

        match outcome.result {
            IntentResult::ImageAdded(record) => Ok(record),
            _ => unreachable!("add image intent returns the added record"),
        }
    }

    /// Removes an image from a tier; fails if the tier would become
    /// unplayable.
    pub async fn remove_image(&self, id: ImageId, difficulty: Difficulty) -> Result<()> {
        self.dispatch(AdminIntent::RemoveImage(RemoveImageIntent { id, difficulty }))
            .await
            .map(drop)
    }

    /// Moves an image between tiers. Returns false when the id was not
    /// present in the source tier.
    pub async fn move_image(
        &self,
        id: ImageId,
        from: Difficulty,
        to: Difficulty,
    ) -> Result<bool> {
        let outcome = self
            .dispatch(AdminIntent::MoveImage(MoveImageIntent { id, from, to }))
            .await?;

        match outcome.result {
            IntentResult::ImageMoved { moved, .. } => Ok(moved),
            _ => unreachable!("move image intent reports whether it moved"),
        }
    }

    /// Queries a read-only snapshot of the current game state.
    pub async fn query_state(&self) -> Result<GameState> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryState { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribes to the event stream.
    pub fn subscribe_events(&self) -> broadcast::Receiver<GameEvent> {
        self.event_tx.subscribe()
    }

    /// Tells the worker to stop. Only [`crate::Runtime::shutdown`] calls
    /// this; handle clones cannot tear the runtime down on their own.
    pub(crate) async fn send_shutdown(&self) -> Result<()> {
        self.command_tx
            .send(Command::Shutdown)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }

    async fn dispatch(&self, intent: impl Into<Intent>) -> Result<ExecutionOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Dispatch {
                intent: intent.into(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }
}
