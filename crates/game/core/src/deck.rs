//! Deck generation for a game session.
//!
//! Card selection is deliberately not random: the generator consumes a
//! prefix of the tier's pool in pool order, so admins control which images
//! appear by ordering the pool. Only the card layout is shuffled.

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::state::{Card, CardId, Difficulty, ImagePool, PairId};

/// Errors raised while generating a deck.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeckError {
    #[error(
        "the {difficulty} tier holds {available} images but needs {required} to start a game"
    )]
    InsufficientImages {
        difficulty: Difficulty,
        required: usize,
        available: usize,
    },
}

/// Builds a shuffled deck of `2 * pair_count` cards for the given tier.
///
/// For the image at pool position `i`, the two emitted cards are
/// `{id: 2i, pair: i}` and `{id: 2i + 1, pair: i}`, so ids form the dense
/// range `[0, 2 * pair_count)` and every pair id appears exactly twice.
/// The final order is a uniform Fisher-Yates shuffle driven by `rng`.
pub fn generate<R: Rng + ?Sized>(
    difficulty: Difficulty,
    pool: &ImagePool,
    rng: &mut R,
) -> Result<Vec<Card>, DeckError> {
    let required = difficulty.pair_count();
    let tier = pool.tier(difficulty);

    if tier.len() < required {
        return Err(DeckError::InsufficientImages {
            difficulty,
            required,
            available: tier.len(),
        });
    }

    let mut cards = Vec::with_capacity(required * 2);
    for (index, image) in tier.iter().take(required).enumerate() {
        let pair = PairId(index as u8);
        cards.push(Card {
            id: CardId((index * 2) as u8),
            image: image.url.clone(),
            pair,
        });
        cards.push(Card {
            id: CardId((index * 2 + 1) as u8),
            image: image.url.clone(),
            pair,
        });
    }

    cards.shuffle(rng);

    Ok(cards)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use strum::IntoEnumIterator;

    use super::*;
    use crate::state::{ImageId, ImageRecord};

    fn pool_with(difficulty: Difficulty, count: u64) -> ImagePool {
        let mut pool = ImagePool::empty();
        for id in 1..=count {
            pool.insert(ImageRecord {
                id: ImageId(id),
                url: format!("https://img.example/{id}"),
                difficulty,
            });
        }
        pool
    }

    #[test]
    fn deck_has_dense_ids_and_every_pair_twice() {
        for difficulty in Difficulty::iter() {
            let pool = pool_with(difficulty, difficulty.pair_count() as u64);
            let mut rng = StdRng::seed_from_u64(1);

            let deck = generate(difficulty, &pool, &mut rng).unwrap();

            assert_eq!(deck.len(), difficulty.pair_count() * 2);

            let mut ids: Vec<_> = deck.iter().map(|card| card.id.0).collect();
            ids.sort_unstable();
            let expected: Vec<_> = (0..deck.len() as u8).collect();
            assert_eq!(ids, expected);

            let mut per_pair: BTreeMap<PairId, usize> = BTreeMap::new();
            for card in &deck {
                *per_pair.entry(card.pair).or_default() += 1;
            }
            assert_eq!(per_pair.len(), difficulty.pair_count());
            assert!(per_pair.values().all(|&count| count == 2));
        }
    }

    #[test]
    fn paired_cards_share_the_same_image() {
        let pool = pool_with(Difficulty::Easy, 6);
        let mut rng = StdRng::seed_from_u64(2);

        let deck = generate(Difficulty::Easy, &pool, &mut rng).unwrap();

        for card in &deck {
            let partner = deck
                .iter()
                .find(|other| other.pair == card.pair && other.id != card.id)
                .unwrap();
            assert_eq!(card.image, partner.image);
        }
    }

    #[test]
    fn oversized_pool_uses_only_the_prefix() {
        let mut pool = pool_with(Difficulty::Easy, 6);
        pool.insert(ImageRecord {
            id: ImageId(999),
            url: "https://img.example/unused".into(),
            difficulty: Difficulty::Easy,
        });
        let mut rng = StdRng::seed_from_u64(3);

        let deck = generate(Difficulty::Easy, &pool, &mut rng).unwrap();

        assert!(deck.iter().all(|card| card.image != "https://img.example/unused"));
    }

    #[test]
    fn short_pool_is_rejected() {
        let pool = pool_with(Difficulty::Hard, 11);
        let mut rng = StdRng::seed_from_u64(4);

        let result = generate(Difficulty::Hard, &pool, &mut rng);

        assert_eq!(
            result,
            Err(DeckError::InsufficientImages {
                difficulty: Difficulty::Hard,
                required: 12,
                available: 11,
            })
        );
    }

    /// Positional distribution check: across many seeds, card #0 should land
    /// in each slot roughly uniformly. With 2000 trials over 12 slots the
    /// expected count per slot is ~166; the bounds are generous enough to
    /// keep the test deterministic-stable while catching a biased shuffle.
    #[test]
    fn shuffle_is_positionally_uniform() {
        let pool = pool_with(Difficulty::Easy, 6);
        const TRIALS: usize = 2000;
        let mut position_counts = [0usize; 12];

        for seed in 0..TRIALS as u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let deck = generate(Difficulty::Easy, &pool, &mut rng).unwrap();
            let position = deck.iter().position(|card| card.id == CardId(0)).unwrap();
            position_counts[position] += 1;
        }

        for (slot, &count) in position_counts.iter().enumerate() {
            assert!(
                (80..=280).contains(&count),
                "card #0 landed in slot {slot} {count} times out of {TRIALS}"
            );
        }
    }
}
