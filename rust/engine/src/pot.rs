use serde::{Deserialize, Serialize};

use crate::seat::{Chips, PlayerId, SeatSnapshot, SeatStatus};

/// One pot layer and the players entitled to contest it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: Chips,
    pub eligible: Vec<PlayerId>,
}

/// Partitions every chip contributed this hand into a main pot and however
/// many side pots the all-in amounts require.
///
/// Contribution levels are every all-in seat's total plus the overall
/// maximum, walked in ascending order; each contributor pays its capped
/// share of each level's increment, and eligibility at a level is restricted
/// to non-folded seats whose total contribution reaches it. A seat that
/// folded keeps its chips in the pots but is never eligible.
pub fn compute_pots(seats: &[SeatSnapshot]) -> Vec<Pot> {
    let contributors: Vec<&SeatSnapshot> = seats.iter().filter(|s| s.total_bet > 0).collect();
    let max_bet = match contributors.iter().map(|s| s.total_bet).max() {
        Some(max) => max,
        None => return Vec::new(),
    };

    let mut levels: Vec<Chips> = contributors
        .iter()
        .filter(|s| s.status == SeatStatus::AllIn)
        .map(|s| s.total_bet)
        .collect();
    levels.push(max_bet);
    levels.sort_unstable();
    levels.dedup();

    let mut pots = Vec::new();
    let mut prev: Chips = 0;
    for level in levels {
        if level == prev {
            continue;
        }
        let mut amount: Chips = 0;
        for s in &contributors {
            amount += s.total_bet.min(level) - s.total_bet.min(prev);
        }
        let eligible: Vec<PlayerId> = contributors
            .iter()
            .filter(|s| s.status != SeatStatus::Folded && s.total_bet >= level)
            .map(|s| s.player)
            .collect();
        if amount > 0 {
            pots.push(Pot { amount, eligible });
        }
        prev = level;
    }
    pots
}
