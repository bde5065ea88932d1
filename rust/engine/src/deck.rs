use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// A deck shuffled deterministically from a seed.
///
/// The ordering is a pure function of the seed: a single Fisher-Yates pass
/// driven by a ChaCha20 generator seeded from it. Replaying the same seed
/// reproduces the exact deal, which is what makes the post-hand seed reveal
/// auditable by any observer.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut cards = full_deck();
        cards.shuffle(&mut rng);
        Self { cards, position: 0 }
    }

    /// Draws a fresh secret seed for a new hand. The seed must exist before
    /// any card is shown and is never mutated afterwards.
    pub fn fresh_seed() -> u64 {
        rand::rng().random()
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        if self.position >= self.cards.len() {
            None
        } else {
            let c = self.cards[self.position];
            self.position += 1;
            Some(c)
        }
    }

    /// Skips cards consumed earlier in the hand, so community cards continue
    /// from the offset where hole-card dealing left off.
    pub fn skip(&mut self, n: usize) {
        self.position = (self.position + n).min(self.cards.len());
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}
