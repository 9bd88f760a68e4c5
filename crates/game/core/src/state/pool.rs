//! Per-difficulty image collections curated by the admin surface.

use thiserror::Error;

use crate::state::common::{Difficulty, ImageId};

/// Errors raised by image pool mutations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PoolError {
    #[error("removing image {id} would drop the {difficulty} tier below its minimum of {minimum} images")]
    BelowMinimum {
        id: ImageId,
        difficulty: Difficulty,
        minimum: usize,
    },

    #[error("image {id} not found in the {difficulty} tier")]
    ImageNotFound { id: ImageId, difficulty: Difficulty },
}

/// A single curated image.
///
/// Invariant: `difficulty` always equals the tier collection currently
/// holding the record; [`ImagePool::transfer`] relabels it on every move.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageRecord {
    pub id: ImageId,
    pub url: String,
    pub difficulty: Difficulty,
}

/// Ordered image collections, one per difficulty tier.
///
/// Order matters: deck generation consumes a prefix of the tier in pool
/// order, so curation decides which images appear in play.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImagePool {
    easy: Vec<ImageRecord>,
    medium: Vec<ImageRecord>,
    hard: Vec<ImageRecord>,
}

impl ImagePool {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a pool from per-tier records, relabeling each record to the
    /// tier it lands in so the difficulty invariant holds from the start.
    pub fn from_tiers(
        easy: Vec<ImageRecord>,
        medium: Vec<ImageRecord>,
        hard: Vec<ImageRecord>,
    ) -> Self {
        let relabel = |records: Vec<ImageRecord>, difficulty| {
            records
                .into_iter()
                .map(|record| ImageRecord { difficulty, ..record })
                .collect()
        };

        Self {
            easy: relabel(easy, Difficulty::Easy),
            medium: relabel(medium, Difficulty::Medium),
            hard: relabel(hard, Difficulty::Hard),
        }
    }

    pub fn tier(&self, difficulty: Difficulty) -> &[ImageRecord] {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    fn tier_mut(&mut self, difficulty: Difficulty) -> &mut Vec<ImageRecord> {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }

    pub fn find(&self, id: ImageId, difficulty: Difficulty) -> Option<&ImageRecord> {
        self.tier(difficulty).iter().find(|record| record.id == id)
    }

    /// Appends a record to the tier named by its own `difficulty` field.
    pub fn insert(&mut self, record: ImageRecord) {
        self.tier_mut(record.difficulty).push(record);
    }

    /// Removes an image, refusing when the tier would drop below `minimum`.
    pub fn remove(
        &mut self,
        id: ImageId,
        difficulty: Difficulty,
        minimum: usize,
    ) -> Result<ImageRecord, PoolError> {
        let tier = self.tier_mut(difficulty);

        let index = tier
            .iter()
            .position(|record| record.id == id)
            .ok_or(PoolError::ImageNotFound { id, difficulty })?;

        if tier.len() <= minimum {
            return Err(PoolError::BelowMinimum {
                id,
                difficulty,
                minimum,
            });
        }

        Ok(tier.remove(index))
    }

    /// Moves an image between tiers, relabeling its `difficulty` field and
    /// appending it to the destination.
    ///
    /// Returns `Ok(false)` without touching the pool when the id is absent
    /// from the source tier or the source and destination are the same. The
    /// source tier keeps the same `minimum` guard as [`ImagePool::remove`].
    pub fn transfer(
        &mut self,
        id: ImageId,
        from: Difficulty,
        to: Difficulty,
        minimum: usize,
    ) -> Result<bool, PoolError> {
        if from == to || self.find(id, from).is_none() {
            return Ok(false);
        }

        let source = self.tier_mut(from);
        if source.len() <= minimum {
            return Err(PoolError::BelowMinimum {
                id,
                difficulty: from,
                minimum,
            });
        }

        // Presence was checked above; position cannot fail here.
        let index = source
            .iter()
            .position(|record| record.id == id)
            .ok_or(PoolError::ImageNotFound { id, difficulty: from })?;
        let mut record = source.remove(index);
        record.difficulty = to;
        self.tier_mut(to).push(record);

        Ok(true)
    }

    /// Largest image id present in any tier, used to seed the id allocator
    /// when state is rebuilt from a persisted pool.
    pub fn max_id(&self) -> u64 {
        [&self.easy, &self.medium, &self.hard]
            .into_iter()
            .flatten()
            .map(|record| record.id.0)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, difficulty: Difficulty) -> ImageRecord {
        ImageRecord {
            id: ImageId(id),
            url: format!("https://img.example/{id}"),
            difficulty,
        }
    }

    fn pool_with_easy(count: u64) -> ImagePool {
        let mut pool = ImagePool::empty();
        for id in 1..=count {
            pool.insert(record(id, Difficulty::Easy));
        }
        pool
    }

    #[test]
    fn remove_below_minimum_fails_and_leaves_pool_unchanged() {
        let mut pool = pool_with_easy(6);
        let before = pool.clone();

        let result = pool.remove(ImageId(3), Difficulty::Easy, 6);

        assert_eq!(
            result,
            Err(PoolError::BelowMinimum {
                id: ImageId(3),
                difficulty: Difficulty::Easy,
                minimum: 6,
            })
        );
        assert_eq!(pool, before);
    }

    #[test]
    fn remove_above_minimum_returns_the_record() {
        let mut pool = pool_with_easy(7);

        let removed = pool.remove(ImageId(3), Difficulty::Easy, 6).unwrap();

        assert_eq!(removed.id, ImageId(3));
        assert_eq!(pool.tier(Difficulty::Easy).len(), 6);
        assert!(pool.find(ImageId(3), Difficulty::Easy).is_none());
    }

    #[test]
    fn remove_unknown_image_fails() {
        let mut pool = pool_with_easy(7);

        let result = pool.remove(ImageId(99), Difficulty::Easy, 6);

        assert_eq!(
            result,
            Err(PoolError::ImageNotFound {
                id: ImageId(99),
                difficulty: Difficulty::Easy,
            })
        );
    }

    #[test]
    fn transfer_relabels_and_appends_to_destination() {
        let mut pool = pool_with_easy(7);
        pool.insert(record(100, Difficulty::Medium));

        let moved = pool
            .transfer(ImageId(2), Difficulty::Easy, Difficulty::Medium, 6)
            .unwrap();

        assert!(moved);
        assert!(pool.find(ImageId(2), Difficulty::Easy).is_none());
        let record = pool.find(ImageId(2), Difficulty::Medium).unwrap();
        assert_eq!(record.difficulty, Difficulty::Medium);
        // Appended after the existing medium record.
        assert_eq!(pool.tier(Difficulty::Medium).last().unwrap().id, ImageId(2));
    }

    #[test]
    fn transfer_missing_image_is_a_noop() {
        let mut pool = pool_with_easy(7);
        let before = pool.clone();

        let moved = pool
            .transfer(ImageId(42), Difficulty::Easy, Difficulty::Hard, 6)
            .unwrap();

        assert!(!moved);
        assert_eq!(pool, before);
    }

    #[test]
    fn transfer_guards_the_source_minimum() {
        let mut pool = pool_with_easy(6);

        let result = pool.transfer(ImageId(1), Difficulty::Easy, Difficulty::Hard, 6);

        assert!(matches!(result, Err(PoolError::BelowMinimum { .. })));
        assert_eq!(pool.tier(Difficulty::Easy).len(), 6);
    }
}
