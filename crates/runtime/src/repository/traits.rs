//! Profile store abstraction.

use game_core::{ImagePool, LeaderboardEntry};

use crate::repository::error::Result;

/// Durable storage for the leaderboard and image pool blobs.
///
/// Each save replaces the whole blob; there is no partial update. Loads
/// return `Ok(None)` when the blob has never been written, letting callers
/// fall back to seed data. All methods are synchronous: the blobs are small
/// and every call happens on the single-writer session worker.
pub trait ProfileStore: Send + Sync {
    fn load_leaderboard(&self) -> Result<Option<Vec<LeaderboardEntry>>>;

    fn save_leaderboard(&self, entries: &[LeaderboardEntry]) -> Result<()>;

    fn load_image_pool(&self) -> Result<Option<ImagePool>>;

    fn save_image_pool(&self, pool: &ImagePool) -> Result<()>;
}
