//! Built-in default image set.
//!
//! Used whenever the image pool blob is absent or unreadable, so a fresh
//! install is immediately playable on every tier.

use game_core::{Difficulty, ImageId, ImagePool, ImageRecord};

const URL_DOG: &str =
    "https://images.unsplash.com/photo-1574144611937-0df059b5ef3e?w=200&h=200&fit=crop";
const URL_PUPPY: &str =
    "https://images.unsplash.com/photo-1601758228041-f3b2795255f1?w=200&h=200&fit=crop";
const URL_KITTEN: &str =
    "https://images.unsplash.com/photo-1583337130417-3346a1be7dee?w=200&h=200&fit=crop";
const URL_CAT: &str =
    "https://images.unsplash.com/photo-1592194996308-7b43878e84a6?w=200&h=200&fit=crop";
const URL_RABBIT: &str =
    "https://images.unsplash.com/photo-1601758125946-6ec2ef64daf8?w=200&h=200&fit=crop";

/// Builds the default pool: exactly the minimum image count per tier.
pub fn default_image_pool() -> ImagePool {
    let records = |difficulty: Difficulty, first_id: u64, urls: &[&str]| {
        urls.iter()
            .zip(first_id..)
            .map(|(&url, id)| ImageRecord {
                id: ImageId(id),
                url: url.to_string(),
                difficulty,
            })
            .collect::<Vec<_>>()
    };

    ImagePool::from_tiers(
        records(
            Difficulty::Easy,
            1,
            &[URL_DOG, URL_PUPPY, URL_KITTEN, URL_CAT, URL_RABBIT, URL_KITTEN],
        ),
        records(
            Difficulty::Medium,
            7,
            &[
                URL_DOG, URL_PUPPY, URL_KITTEN, URL_CAT, URL_RABBIT, URL_KITTEN, URL_DOG,
                URL_PUPPY,
            ],
        ),
        records(
            Difficulty::Hard,
            15,
            &[
                URL_DOG, URL_PUPPY, URL_KITTEN, URL_CAT, URL_RABBIT, URL_KITTEN, URL_DOG,
                URL_PUPPY, URL_KITTEN, URL_CAT, URL_RABBIT, URL_KITTEN,
            ],
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tier_meets_its_minimum() {
        let pool = default_image_pool();

        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(pool.tier(difficulty).len(), difficulty.min_images());
            assert!(
                pool.tier(difficulty)
                    .iter()
                    .all(|record| record.difficulty == difficulty)
            );
        }
    }

    #[test]
    fn seed_ids_are_unique() {
        let pool = default_image_pool();
        assert_eq!(pool.max_id(), 26);

        let mut ids: Vec<_> = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
            .into_iter()
            .flat_map(|d| pool.tier(d).iter().map(|r| r.id.0))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 26);
    }
}
