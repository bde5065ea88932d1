use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::EngineError;

/// Hand rank classes from weakest to strongest. The discriminant is the most
/// significant component of the numeric score.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankClass {
    HighCard = 0,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

impl RankClass {
    pub fn name(self) -> &'static str {
        match self {
            RankClass::HighCard => "High Card",
            RankClass::OnePair => "One Pair",
            RankClass::TwoPair => "Two Pair",
            RankClass::ThreeOfAKind => "Three of a Kind",
            RankClass::Straight => "Straight",
            RankClass::Flush => "Flush",
            RankClass::FullHouse => "Full House",
            RankClass::FourOfAKind => "Four of a Kind",
            RankClass::StraightFlush => "Straight Flush",
            RankClass::RoyalFlush => "Royal Flush",
        }
    }
}

// Width of one rank class in the score encoding. Five base-15 tie-break
// slots top out well below this, so classes can never collide.
const CLASS_SPAN: u64 = 10_000_000_000;
const SLOT_WEIGHTS: [u64; 5] = [50_625, 3_375, 225, 15, 1];

/// The best five-card hand found in an input, with a score that totally
/// orders all possible hands: equal scores imply the same rank class and the
/// same kicker composition.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandStrength {
    pub class: RankClass,
    pub score: u64,
    pub best_five: [Card; 5],
}

impl HandStrength {
    pub fn compare(&self, other: &HandStrength) -> Ordering {
        self.score.cmp(&other.score)
    }
}

/// Returns the best five-card hand makeable from 5 to 7 cards.
///
/// Every 5-card subset is ranked and the global best wins. Brute force is
/// deliberate: this function decides who gets the money.
pub fn evaluate(cards: &[Card]) -> Result<HandStrength, EngineError> {
    let n = cards.len();
    if !(5..=7).contains(&n) {
        return Err(EngineError::InvalidCardCount(n));
    }
    let mut best: Option<HandStrength> = None;
    for a in 0..n - 4 {
        for b in a + 1..n - 3 {
            for c in b + 1..n - 2 {
                for d in c + 1..n - 1 {
                    for e in d + 1..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let (class, score) = rank_five(&five);
                        if best.as_ref().map_or(true, |h| score > h.score) {
                            best = Some(HandStrength {
                                class,
                                score,
                                best_five: five,
                            });
                        }
                    }
                }
            }
        }
    }
    best.ok_or(EngineError::InvalidCardCount(n))
}

/// Ranks exactly five cards. In a five-card hand a flush or straight rules
/// out paired ranks, so the categories partition cleanly.
fn rank_five(five: &[Card; 5]) -> (RankClass, u64) {
    let mut ranks: Vec<u8> = five.iter().map(|c| c.rank.value()).collect();
    ranks.sort_unstable_by(|a, b| b.cmp(a));

    let flush = five.iter().all(|c| c.suit == five[0].suit);
    let straight = straight_high(&ranks);

    // (rank, multiplicity), highest multiplicity first, then rank descending
    let mut groups: Vec<(u8, u8)> = Vec::new();
    for &r in &ranks {
        match groups.iter_mut().find(|(rank, _)| *rank == r) {
            Some((_, n)) => *n += 1,
            None => groups.push((r, 1)),
        }
    }
    groups.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));

    let (class, tiebreaks) = if flush && straight.is_some() {
        let high = straight.unwrap_or(0);
        let class = if high == 14 {
            RankClass::RoyalFlush
        } else {
            RankClass::StraightFlush
        };
        (class, [high, 0, 0, 0, 0])
    } else if groups[0].1 == 4 {
        (RankClass::FourOfAKind, [groups[0].0, groups[1].0, 0, 0, 0])
    } else if groups[0].1 == 3 && groups[1].1 == 2 {
        (RankClass::FullHouse, [groups[0].0, groups[1].0, 0, 0, 0])
    } else if flush {
        (
            RankClass::Flush,
            [ranks[0], ranks[1], ranks[2], ranks[3], ranks[4]],
        )
    } else if let Some(high) = straight {
        (RankClass::Straight, [high, 0, 0, 0, 0])
    } else if groups[0].1 == 3 {
        (
            RankClass::ThreeOfAKind,
            [groups[0].0, groups[1].0, groups[2].0, 0, 0],
        )
    } else if groups[0].1 == 2 && groups[1].1 == 2 {
        (
            RankClass::TwoPair,
            [groups[0].0, groups[1].0, groups[2].0, 0, 0],
        )
    } else if groups[0].1 == 2 {
        (
            RankClass::OnePair,
            [groups[0].0, groups[1].0, groups[2].0, groups[3].0, 0],
        )
    } else {
        (
            RankClass::HighCard,
            [ranks[0], ranks[1], ranks[2], ranks[3], ranks[4]],
        )
    };

    let mut score = class as u64 * CLASS_SPAN;
    for (t, w) in tiebreaks.iter().zip(SLOT_WEIGHTS) {
        score += *t as u64 * w;
    }
    (class, score)
}

/// Detects five distinct consecutive ranks, with `A-2-3-4-5` counted as the
/// 5-high wheel.
fn straight_high(ranks_desc: &[u8]) -> Option<u8> {
    let mut v = ranks_desc.to_vec();
    v.sort_unstable();
    v.dedup();
    if v.len() != 5 {
        return None;
    }
    if v[4] - v[0] == 4 {
        return Some(v[4]);
    }
    if v == [2, 3, 4, 5, 14] {
        return Some(5);
    }
    None
}
