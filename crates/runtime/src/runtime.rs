//! High-level runtime orchestrator.
//!
//! The runtime loads persisted profile data (falling back to seeds), spawns
//! the session worker, and exposes a builder-based API for clients to drive
//! the game through [`RuntimeHandle`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::warn;

use game_core::{GameConfig, GameState, Leaderboard};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::GameEvent;
use crate::repository::{MemoryStore, ProfileStore};
use crate::seed;
use crate::workers::{Command, SessionWorker};

/// Runtime configuration shared across the orchestrator and the worker.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Pause between the second flip and match evaluation, giving the
    /// player time to see both faces.
    pub reveal_delay: Duration,
    /// How long a mismatched pair stays face up before clearing.
    pub mismatch_delay: Duration,
    /// Period of the session clock.
    pub tick_interval: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            reveal_delay: Duration::from_millis(500),
            mismatch_delay: Duration::from_millis(1000),
            tick_interval: Duration::from_secs(1),
        }
    }
}

/// Main runtime that owns the session worker.
///
/// [`RuntimeHandle`] provides a cloneable façade for clients;
/// [`Runtime::shutdown`] (or dropping every handle) tears the worker down
/// and cancels every pending timer with it.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to game events.
    pub fn subscribe_events(&self) -> broadcast::Receiver<GameEvent> {
        self.handle.subscribe_events()
    }

    /// Shutdown the runtime gracefully.
    ///
    /// The worker stops as soon as it picks up the shutdown command, even
    /// while handle clones are still alive elsewhere; their later calls
    /// fail with a closed channel.
    pub async fn shutdown(self) -> Result<()> {
        // A closed channel here means the worker is already gone.
        let _ = self.handle.send_shutdown().await;
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    store: Option<Arc<dyn ProfileStore>>,
    game_seed: Option<u64>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            store: None,
            game_seed: None,
        }
    }

    /// Override runtime configuration.
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the profile store. Defaults to an ephemeral [`MemoryStore`];
    /// pass a [`crate::FileStore`] for durable profiles.
    pub fn store(mut self, store: Arc<dyn ProfileStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Pin the shuffle seed. Defaults to process entropy; tests pin it to
    /// make deck layouts reproducible.
    pub fn game_seed(mut self, seed: u64) -> Self {
        self.game_seed = Some(seed);
        self
    }

    /// Build the runtime and spawn its worker.
    ///
    /// Unreadable blobs are logged and replaced by seed data rather than
    /// failing the build: a corrupt profile should never make the game
    /// unlaunchable.
    pub async fn build(self) -> Result<Runtime> {
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()) as Arc<dyn ProfileStore>);
        let game_seed = self.game_seed.unwrap_or_else(rand::random::<u64>);

        let pool = match store.load_image_pool() {
            Ok(Some(pool)) => pool,
            Ok(None) => seed::default_image_pool(),
            Err(err) => {
                warn!(
                    target: "runtime::repository",
                    error = %err,
                    "image pool blob unreadable; falling back to the built-in set"
                );
                seed::default_image_pool()
            }
        };

        let leaderboard = match store.load_leaderboard() {
            Ok(Some(entries)) => Leaderboard::from_entries(entries),
            Ok(None) => Leaderboard::new(),
            Err(err) => {
                warn!(
                    target: "runtime::repository",
                    error = %err,
                    "leaderboard blob unreadable; starting empty"
                );
                Leaderboard::new()
            }
        };

        let state = GameState::with_seed(game_seed, pool, leaderboard);

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (event_tx, _event_rx) = broadcast::channel::<GameEvent>(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_tx.clone());

        let worker = SessionWorker::new(state, &self.config, store, command_rx, event_tx);
        let worker_handle = tokio::spawn(worker.run());

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
