//! Admin intents curating the image pool.
//!
//! URL validation (does the image actually load) is the admin surface's job
//! before dispatching [`AddImageIntent`]; the model trusts its input.

use crate::env::GameEnv;
use crate::intent::{IntentResult, IntentTransition};
use crate::state::{Difficulty, GameState, ImageId, ImageRecord, PoolError};

/// Appends a new image to a tier with a freshly allocated id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddImageIntent {
    pub url: String,
    pub difficulty: Difficulty,
}

impl IntentTransition for AddImageIntent {
    type Error = PoolError;

    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
    ) -> Result<IntentResult, Self::Error> {
        let record = ImageRecord {
            id: state.allocate_image_id(),
            url: self.url.clone(),
            difficulty: self.difficulty,
        };
        state.pool.insert(record.clone());

        Ok(IntentResult::ImageAdded(record))
    }
}

/// Removes an image from a tier.
///
/// The minimum-count guard lives in [`crate::state::ImagePool::remove`]: a
/// removal that would leave the tier unplayable is rejected outright rather
/// than relying on every caller to check first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoveImageIntent {
    pub id: ImageId,
    pub difficulty: Difficulty,
}

impl IntentTransition for RemoveImageIntent {
    type Error = PoolError;

    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
    ) -> Result<IntentResult, Self::Error> {
        state
            .pool
            .remove(self.id, self.difficulty, self.difficulty.min_images())?;

        Ok(IntentResult::ImageRemoved { id: self.id })
    }
}

/// Moves an image between tiers, relabeling its difficulty.
///
/// An unknown id in the source tier is a silent no-op (`moved: false`).
/// Moving out of a tier respects the same minimum-count guard as removal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveImageIntent {
    pub id: ImageId,
    pub from: Difficulty,
    pub to: Difficulty,
}

impl IntentTransition for MoveImageIntent {
    type Error = PoolError;

    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
    ) -> Result<IntentResult, Self::Error> {
        let moved = state
            .pool
            .transfer(self.id, self.from, self.to, self.from.min_images())?;

        Ok(IntentResult::ImageMoved { id: self.id, moved })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::state::{ImagePool, Leaderboard};

    fn seeded_state() -> GameState {
        let mut pool = ImagePool::empty();
        for id in 1..=7 {
            pool.insert(ImageRecord {
                id: ImageId(id),
                url: format!("https://img.example/{id}"),
                difficulty: Difficulty::Easy,
            });
        }
        GameState::new(pool, Leaderboard::new())
    }

    #[test]
    fn add_image_allocates_monotonic_ids() {
        let mut state = seeded_state();
        let config = GameConfig::default();
        let env = GameEnv::new(&config);

        let first = AddImageIntent {
            url: "https://img.example/a".into(),
            difficulty: Difficulty::Medium,
        }
        .apply(&mut state, &env)
        .unwrap();
        let second = AddImageIntent {
            url: "https://img.example/b".into(),
            difficulty: Difficulty::Medium,
        }
        .apply(&mut state, &env)
        .unwrap();

        let (IntentResult::ImageAdded(a), IntentResult::ImageAdded(b)) = (first, second) else {
            panic!("expected added records");
        };
        assert_eq!(a.id, ImageId(8));
        assert_eq!(b.id, ImageId(9));
        assert_eq!(state.pool.tier(Difficulty::Medium).len(), 2);
    }

    #[test]
    fn remove_image_respects_the_tier_minimum() {
        let mut state = seeded_state();
        let config = GameConfig::default();
        let env = GameEnv::new(&config);

        RemoveImageIntent { id: ImageId(7), difficulty: Difficulty::Easy }
            .apply(&mut state, &env)
            .unwrap();

        let result = RemoveImageIntent { id: ImageId(6), difficulty: Difficulty::Easy }
            .apply(&mut state, &env);

        assert!(matches!(result, Err(PoolError::BelowMinimum { .. })));
        assert_eq!(state.pool.tier(Difficulty::Easy).len(), 6);
    }

    #[test]
    fn move_image_relabels_and_is_silent_on_missing_ids() {
        let mut state = seeded_state();
        let config = GameConfig::default();
        let env = GameEnv::new(&config);

        let moved = MoveImageIntent {
            id: ImageId(7),
            from: Difficulty::Easy,
            to: Difficulty::Hard,
        }
        .apply(&mut state, &env)
        .unwrap();
        assert_eq!(moved, IntentResult::ImageMoved { id: ImageId(7), moved: true });
        assert_eq!(
            state.pool.find(ImageId(7), Difficulty::Hard).unwrap().difficulty,
            Difficulty::Hard
        );

        let missing = MoveImageIntent {
            id: ImageId(77),
            from: Difficulty::Easy,
            to: Difficulty::Hard,
        }
        .apply(&mut state, &env)
        .unwrap();
        assert_eq!(missing, IntentResult::ImageMoved { id: ImageId(77), moved: false });
    }
}
