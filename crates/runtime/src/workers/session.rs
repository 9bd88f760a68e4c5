//! Session worker that owns the authoritative [`game_core::GameState`].
//!
//! Receives commands from [`crate::RuntimeHandle`], executes intents via
//! [`game_core::GameEngine`], persists dirty slices, and publishes events.
//! The worker is the single writer: every mutation, whether it originates
//! from a client or from one of the worker's own timers, is serialized
//! through the same inbox-driven loop.
//!
//! Timing policy lives here, not in the state machine:
//! - a 1 s interval advances the clock while the session is playing;
//! - flipping the second card arms a deferred evaluation (reveal delay);
//! - a mismatch arms a deferred clear (mismatch window).
//!
//! Deferred work carries the epoch current when it was armed. Reset and
//! game start bump the epoch and disarm the timer, so a stale evaluation
//! can never touch a fresh session.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, warn};

use game_core::{
    AdvanceClockIntent, ClearFlippedIntent, EvaluatePendingIntent, ExecutionOutcome, GameConfig,
    GameEngine, GameEnv, GameState, GameStatus, Intent, IntentResult, RecordResultIntent,
    StateDelta, SystemIntent, TransitionPhase,
};

use crate::api::{Result, RuntimeError};
use crate::events::GameEvent;
use crate::repository::ProfileStore;
use crate::runtime::RuntimeConfig;

/// Commands that can be sent to the session worker.
pub(crate) enum Command {
    /// Execute an intent and reply with the outcome.
    Dispatch {
        intent: Intent,
        reply: oneshot::Sender<Result<ExecutionOutcome>>,
    },
    /// Query the current game state (read-only).
    QueryState { reply: oneshot::Sender<GameState> },
    /// Shutdown the worker gracefully.
    Shutdown,
}

enum DeferredKind {
    Evaluate,
    Clear,
}

struct Deferred {
    kind: DeferredKind,
    epoch: u64,
    deadline: Instant,
}

/// Background task that processes gameplay commands and owns all timers.
pub(crate) struct SessionWorker {
    state: GameState,
    game_config: GameConfig,
    reveal_delay: Duration,
    mismatch_delay: Duration,
    tick_interval: Duration,
    store: Arc<dyn ProfileStore>,
    command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<GameEvent>,
    deferred: Option<Deferred>,
    epoch: u64,
}

impl SessionWorker {
    pub(crate) fn new(
        state: GameState,
        config: &RuntimeConfig,
        store: Arc<dyn ProfileStore>,
        command_rx: mpsc::Receiver<Command>,
        event_tx: broadcast::Sender<GameEvent>,
    ) -> Self {
        Self {
            state,
            game_config: config.game_config.clone(),
            reveal_delay: config.reveal_delay,
            mismatch_delay: config.mismatch_delay,
            tick_interval: config.tick_interval,
            store,
            command_rx,
            event_tx,
            deferred: None,
            epoch: 0,
        }
    }

    /// Main worker loop. Exits on [`Command::Shutdown`] or once every
    /// handle has been dropped.
    pub(crate) async fn run(mut self) {
        let mut tick = time::interval(self.tick_interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first interval tick completes immediately; consume it so the
        // clock first advances a full period after game start.
        tick.tick().await;

        loop {
            let deferred_deadline = self.deferred.as_ref().map(|d| d.deadline);

            tokio::select! {
                maybe_cmd = self.command_rx.recv() => {
                    match maybe_cmd {
                        Some(Command::Shutdown) => {
                            debug!(target: "runtime::worker", "shutdown command received");
                            break;
                        }
                        Some(cmd) => self.handle_command(cmd),
                        None => {
                            debug!(target: "runtime::worker", "command channel closed");
                            break;
                        }
                    }
                }
                _ = tick.tick() => self.handle_tick(),
                _ = sleep_until_opt(deferred_deadline), if deferred_deadline.is_some() => {
                    self.fire_deferred();
                }
            }
        }
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Dispatch { intent, reply } => {
                let result = self.execute(&intent);
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "dispatch reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!(target: "runtime::worker", "query reply channel closed (caller dropped)");
                }
            }
            // Intercepted by the run loop.
            Command::Shutdown => {}
        }
    }

    /// Executes an intent through the engine, then reacts to the outcome:
    /// arms/disarms timers, records completed sessions, persists dirty
    /// slices, and publishes events.
    fn execute(&mut self, intent: &Intent) -> Result<ExecutionOutcome> {
        let env = GameEnv::new(&self.game_config);

        let outcome = match GameEngine::new(&mut self.state).execute(env, intent) {
            Ok(outcome) => outcome,
            Err(err) => {
                if err.phase() == TransitionPhase::PreValidate {
                    debug!(
                        target: "runtime::worker",
                        intent = intent.as_snake_case(),
                        error = %err,
                        "intent rejected during pre-validate"
                    );
                } else {
                    error!(
                        target: "runtime::worker",
                        intent = intent.as_snake_case(),
                        error = %err,
                        "intent execution failed"
                    );
                }

                self.publish(GameEvent::IntentRejected {
                    intent: intent.as_snake_case(),
                    reason: err.to_string(),
                });

                return Err(RuntimeError::Execute(err));
            }
        };

        self.react(&outcome.result);
        self.persist(&outcome.delta);

        Ok(outcome)
    }

    fn react(&mut self, result: &IntentResult) {
        match result {
            IntentResult::DeckGenerated { card_count } => {
                self.invalidate_deferred();
                self.publish(GameEvent::SessionStarted {
                    difficulty: self.state.session.difficulty,
                    card_count: *card_count,
                });
                self.publish(GameEvent::StatusChanged {
                    status: GameStatus::Playing,
                });
            }
            IntentResult::CardFlipped {
                card,
                pending_evaluation,
            } => {
                self.publish(GameEvent::CardFlipped {
                    card: *card,
                    pending_evaluation: *pending_evaluation,
                });
                if *pending_evaluation {
                    self.arm(DeferredKind::Evaluate, self.reveal_delay);
                }
            }
            IntentResult::MatchResolved {
                first,
                second,
                matched,
                completed,
            } => {
                self.publish(GameEvent::MatchResolved {
                    first: *first,
                    second: *second,
                    matched: *matched,
                });
                if !matched {
                    self.arm(DeferredKind::Clear, self.mismatch_delay);
                }
                if *completed {
                    self.publish(GameEvent::StatusChanged {
                        status: GameStatus::Completed,
                    });
                    self.record_completed_session();
                }
            }
            IntentResult::FlippedCleared => self.publish(GameEvent::FlippedCleared),
            IntentResult::ClockAdvanced { time_elapsed } => {
                self.publish(GameEvent::ClockAdvanced {
                    time_elapsed: *time_elapsed,
                });
            }
            IntentResult::Paused => self.publish(GameEvent::StatusChanged {
                status: GameStatus::Paused,
            }),
            IntentResult::Resumed => self.publish(GameEvent::StatusChanged {
                status: GameStatus::Playing,
            }),
            IntentResult::SessionReset => {
                self.invalidate_deferred();
                self.publish(GameEvent::SessionReset);
            }
            IntentResult::ImageAdded(_)
            | IntentResult::ImageRemoved { .. }
            | IntentResult::ImageMoved { .. } => self.publish(GameEvent::PoolUpdated),
            IntentResult::ResultRecorded(entry) => {
                self.publish(GameEvent::SessionCompleted {
                    entry: entry.clone(),
                });
                self.publish(GameEvent::LeaderboardUpdated);
            }
            IntentResult::NameSet | IntentResult::DifficultySet => {}
        }
    }

    /// Appends the completed session's result to the leaderboard.
    ///
    /// This is the only call site of [`RecordResultIntent`], and it runs
    /// exactly once per session: it is triggered by the playing → completed
    /// transition, which evaluation cannot produce twice.
    fn record_completed_session(&mut self) {
        let intent = Intent::System(SystemIntent::RecordResult(RecordResultIntent {
            recorded_at: Utc::now(),
        }));

        if let Err(err) = self.execute(&intent) {
            error!(target: "runtime::worker", error = %err, "failed to record completed session");
        }
    }

    fn handle_tick(&mut self) {
        // The clock only runs while playing; paused and completed sessions
        // simply skip ticks.
        if self.state.session.status != GameStatus::Playing {
            return;
        }

        let intent = Intent::System(SystemIntent::AdvanceClock(AdvanceClockIntent));
        if let Err(err) = self.execute(&intent) {
            warn!(target: "runtime::worker", error = %err, "clock tick failed");
        }
    }

    fn fire_deferred(&mut self) {
        let Some(deferred) = self.deferred.take() else {
            return;
        };

        if deferred.epoch != self.epoch {
            debug!(target: "runtime::worker", "dropping stale deferred action from a discarded session");
            return;
        }

        // Paused mid reveal window: retry after resume instead of mutating
        // paused state.
        if self.state.session.status != GameStatus::Playing {
            let delay = match deferred.kind {
                DeferredKind::Evaluate => self.reveal_delay,
                DeferredKind::Clear => self.mismatch_delay,
            };
            self.deferred = Some(Deferred {
                deadline: Instant::now() + delay,
                ..deferred
            });
            return;
        }

        let intent = match deferred.kind {
            DeferredKind::Evaluate => {
                Intent::System(SystemIntent::EvaluatePending(EvaluatePendingIntent))
            }
            DeferredKind::Clear => Intent::System(SystemIntent::ClearFlipped(ClearFlippedIntent)),
        };

        if let Err(err) = self.execute(&intent) {
            warn!(target: "runtime::worker", error = %err, "deferred action failed");
        }
    }

    fn arm(&mut self, kind: DeferredKind, delay: Duration) {
        self.deferred = Some(Deferred {
            kind,
            epoch: self.epoch,
            deadline: Instant::now() + delay,
        });
    }

    fn invalidate_deferred(&mut self) {
        self.epoch += 1;
        self.deferred = None;
    }

    fn persist(&mut self, delta: &StateDelta) {
        if delta.pool_changed
            && let Err(err) = self.store.save_image_pool(&self.state.pool)
        {
            warn!(
                target: "runtime::worker",
                error = %err,
                "failed to persist image pool; continuing in memory"
            );
            self.publish(GameEvent::StorageFailure {
                reason: err.to_string(),
            });
        }

        if delta.leaderboard_changed
            && let Err(err) = self.store.save_leaderboard(self.state.leaderboard.entries())
        {
            warn!(
                target: "runtime::worker",
                error = %err,
                "failed to persist leaderboard; continuing in memory"
            );
            self.publish(GameEvent::StorageFailure {
                reason: err.to_string(),
            });
        }
    }

    fn publish(&self, event: GameEvent) {
        // Send only fails when nobody is subscribed, which is fine.
        let _ = self.event_tx.send(event);
    }
}

async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
