/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Points awarded for each matched pair.
    pub score_per_match: u32,

    /// Maximum number of leaderboard entries retained; entries beyond the
    /// cap are permanently discarded on insert.
    pub leaderboard_capacity: usize,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// At most two cards can be face up at once; the pair is evaluated as a
    /// unit before any further flips are accepted.
    pub const MAX_FLIPPED: usize = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SCORE_PER_MATCH: u32 = 100;
    pub const DEFAULT_LEADERBOARD_CAPACITY: usize = 10;

    pub fn new() -> Self {
        Self {
            score_per_match: Self::DEFAULT_SCORE_PER_MATCH,
            leaderboard_capacity: Self::DEFAULT_LEADERBOARD_CAPACITY,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
