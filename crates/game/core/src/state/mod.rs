//! Authoritative game state representation.
//!
//! This module owns the data structures for the live session, the curated
//! image pool, and the leaderboard. Runtime layers clone or query this state
//! but mutate it exclusively through the engine.
mod common;
mod delta;
mod leaderboard;
mod pool;
mod session;

pub use common::{CardId, Difficulty, EntryId, GameStatus, ImageId, PairId};
pub use delta::StateDelta;
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use pool::{ImagePool, ImageRecord, PoolError};
pub use session::{Card, SessionState};

/// Canonical snapshot of the whole game state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Seed for deterministic deck shuffles.
    ///
    /// Set once at construction and never modified. Combined with `nonce`
    /// to derive a fresh shuffle seed for every game start.
    pub game_seed: u64,

    /// Number of intents executed against this state so far. Incremented by
    /// the engine after every successful execution.
    pub nonce: u64,

    /// Sequential image id allocator (monotonically increasing, never reused).
    next_image_id: u64,

    /// Sequential leaderboard entry id allocator.
    next_entry_id: u64,

    /// Transient state of the current game, if any.
    pub session: SessionState,
    /// Curated image collections, persisted on every admin edit.
    pub pool: ImagePool,
    /// Ranked results, persisted on every completed game.
    pub leaderboard: Leaderboard,
}

impl GameState {
    /// Creates a state from persisted (or seeded) collections.
    ///
    /// The id allocators resume past the largest id already present, so ids
    /// stay unique across process restarts.
    pub fn new(pool: ImagePool, leaderboard: Leaderboard) -> Self {
        Self::with_seed(0, pool, leaderboard)
    }

    /// Creates a state with a specific shuffle seed.
    pub fn with_seed(game_seed: u64, pool: ImagePool, leaderboard: Leaderboard) -> Self {
        Self {
            game_seed,
            nonce: 0,
            next_image_id: pool.max_id() + 1,
            next_entry_id: leaderboard.max_id() + 1,
            session: SessionState::default(),
            pool,
            leaderboard,
        }
    }

    /// Allocates a new unique [`ImageId`].
    pub fn allocate_image_id(&mut self) -> ImageId {
        let id = ImageId(self.next_image_id);
        self.next_image_id += 1;
        id
    }

    /// Allocates a new unique [`EntryId`].
    pub fn allocate_entry_id(&mut self) -> EntryId {
        let id = EntryId(self.next_entry_id);
        self.next_entry_id += 1;
        id
    }

    /// Derives the shuffle seed for the next deck from `(game_seed, nonce)`.
    ///
    /// SplitMix64-style mixing so consecutive nonces produce unrelated
    /// shuffles while the whole run stays replayable from `game_seed`.
    pub fn shuffle_seed(&self) -> u64 {
        let mut hash = self.game_seed ^ self.nonce.wrapping_mul(0x9e3779b97f4a7c15);
        hash ^= hash >> 33;
        hash = hash.wrapping_mul(0xff51afd7ed558ccd);
        hash ^= hash >> 33;
        hash
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(ImagePool::empty(), Leaderboard::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_allocators_resume_past_persisted_ids() {
        let mut pool = ImagePool::empty();
        pool.insert(ImageRecord {
            id: ImageId(26),
            url: "https://img.example/26".into(),
            difficulty: Difficulty::Easy,
        });

        let mut state = GameState::new(pool, Leaderboard::new());

        assert_eq!(state.allocate_image_id(), ImageId(27));
        assert_eq!(state.allocate_image_id(), ImageId(28));
        assert_eq!(state.allocate_entry_id(), EntryId(1));
    }

    #[test]
    fn shuffle_seed_varies_with_nonce() {
        let mut state = GameState::with_seed(7, ImagePool::empty(), Leaderboard::new());
        let first = state.shuffle_seed();
        state.nonce += 1;
        assert_ne!(first, state.shuffle_seed());
    }
}
