//! Ranked results of completed sessions.

use chrono::{DateTime, Utc};

use crate::state::common::EntryId;

/// Immutable record of one completed game.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LeaderboardEntry {
    pub id: EntryId,
    pub name: String,
    pub score: u32,
    pub moves: u32,
    /// Session duration in whole seconds.
    pub time: u64,
    pub recorded_at: DateTime<Utc>,
}

/// Append-ranked-trim sequence over completed-game results.
///
/// Kept descending by score; ties preserve insertion order, so earlier
/// results outrank later ones with the same score.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a leaderboard from persisted entries, preserving their order.
    pub fn from_entries(entries: Vec<LeaderboardEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts an entry, re-ranks, and discards everything past `capacity`.
    ///
    /// The sort is stable on score alone, which is what keeps the tie-break
    /// at insertion order.
    pub fn record(&mut self, entry: LeaderboardEntry, capacity: usize) {
        self.entries.push(entry);
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(capacity);
    }

    /// Largest entry id present, used to seed the id allocator when state is
    /// rebuilt from a persisted leaderboard.
    pub fn max_id(&self) -> u64 {
        self.entries
            .iter()
            .map(|entry| entry.id.0)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u64, name: &str, score: u32) -> LeaderboardEntry {
        LeaderboardEntry {
            id: EntryId(id),
            name: name.to_string(),
            score,
            moves: 10,
            time: 60,
            recorded_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[test]
    fn keeps_only_the_top_ten_by_score() {
        let mut board = Leaderboard::new();
        for id in 0..11 {
            board.record(entry(id, "p", (id * 100) as u32), 10);
        }

        assert_eq!(board.len(), 10);
        // The score-0 entry was ranked out.
        assert!(board.entries().iter().all(|e| e.score >= 100));
        assert_eq!(board.entries()[0].score, 1000);
    }

    #[test]
    fn low_score_into_a_full_board_is_discarded() {
        let mut board = Leaderboard::new();
        for id in 0..10 {
            board.record(entry(id, "p", 500), 10);
        }

        board.record(entry(99, "late", 100), 10);

        assert_eq!(board.len(), 10);
        assert!(board.entries().iter().all(|e| e.id != EntryId(99)));
    }

    #[test]
    fn ties_preserve_insertion_order() {
        let mut board = Leaderboard::new();
        board.record(entry(1, "first", 500), 10);
        board.record(entry(2, "second", 500), 10);
        board.record(entry(3, "winner", 600), 10);

        let ids: Vec<_> = board.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![EntryId(3), EntryId(1), EntryId(2)]);
    }

    #[test]
    fn ranking_is_descending_by_score() {
        let mut board = Leaderboard::new();
        board.record(entry(1, "a", 200), 10);
        board.record(entry(2, "b", 700), 10);
        board.record(entry(3, "c", 400), 10);

        let scores: Vec<_> = board.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![700, 400, 200]);
    }
}
