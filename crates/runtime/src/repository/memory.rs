//! In-memory ProfileStore for tests and ephemeral runs.

use std::sync::Mutex;

use game_core::{ImagePool, LeaderboardEntry};

use crate::repository::error::{RepositoryError, Result};
use crate::repository::traits::ProfileStore;

/// In-memory implementation of [`ProfileStore`].
#[derive(Default)]
pub struct MemoryStore {
    leaderboard: Mutex<Option<Vec<LeaderboardEntry>>>,
    pool: Mutex<Option<ImagePool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for MemoryStore {
    fn load_leaderboard(&self) -> Result<Option<Vec<LeaderboardEntry>>> {
        let slot = self
            .leaderboard
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slot.clone())
    }

    fn save_leaderboard(&self, entries: &[LeaderboardEntry]) -> Result<()> {
        let mut slot = self
            .leaderboard
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = Some(entries.to_vec());
        Ok(())
    }

    fn load_image_pool(&self) -> Result<Option<ImagePool>> {
        let slot = self.pool.lock().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slot.clone())
    }

    fn save_image_pool(&self, pool: &ImagePool) -> Result<()> {
        let mut slot = self.pool.lock().map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = Some(pool.clone());
        Ok(())
    }
}
