use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::EngineError;
use crate::hand::{evaluate, HandStrength};
use crate::pot::{compute_pots, Pot};
use crate::seat::{Chips, PlayerId, SeatSnapshot};
use crate::state::HandState;

/// How the hand ended: contested at showdown, or awarded uncontested when
/// everyone else folded.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    Showdown,
    LastStanding,
}

/// One pot share awarded to a player. `hand_name` is absent on uncontested
/// wins, where no hand is ever revealed or evaluated.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PotAward {
    pub player: PlayerId,
    pub pot_index: usize,
    pub amount: Chips,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand_name: Option<String>,
}

/// Audit detail for one hand revealed at showdown.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Reveal {
    pub player: PlayerId,
    pub seat: usize,
    pub hole_cards: [Card; 2],
    pub hand_name: String,
    pub score: u64,
    pub best_five: [Card; 5],
}

/// Final outcome of a hand. Produced once, then frozen.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandResults {
    pub kind: ResultKind,
    pub pots: Vec<Pot>,
    pub winners: Vec<PotAward>,
    pub reveals: Vec<Reveal>,
    /// Present only when the hand reached showdown; an uncontested win never
    /// exposes the deal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revealed_seed: Option<u64>,
}

/// Evaluates every non-folded contender against the final board and awards
/// each pot independently to its best eligible hand(s).
///
/// Ties split a pot evenly; the odd remainder goes to the first tied winner
/// in seat order after the dealer. The second return value is a fairness
/// alarm: equal scores from different rank classes cannot happen unless the
/// evaluator or its scoring constants have drifted.
pub(crate) fn resolve_showdown(
    state: &HandState,
    seats: &[SeatSnapshot],
) -> Result<(HandResults, Option<String>), EngineError> {
    if state.board.len() != 5 {
        return Err(EngineError::CorruptLog(format!(
            "showdown with {} community cards",
            state.board.len()
        )));
    }

    let holes = state.hole_cards()?;
    let mut entries: Vec<(usize, PlayerId, [Card; 2], HandStrength)> = Vec::new();
    for s in seats.iter().filter(|s| s.in_hand()) {
        let hole = holes
            .iter()
            .find(|(seat, _)| *seat == s.seat)
            .map(|(_, cards)| *cards)
            .ok_or_else(|| {
                EngineError::CorruptLog(format!("seat {} contests without hole cards", s.seat))
            })?;
        let mut cards: Vec<Card> = hole.to_vec();
        cards.extend_from_slice(&state.board);
        let strength = evaluate(&cards)?;
        entries.push((s.seat, s.player, hole, strength));
    }
    entries.sort_by_key(|(seat, ..)| ring_position(*seat, state.dealer_seat));

    let pots = compute_pots(seats);
    let mut winners = Vec::new();
    let mut alert = None;

    for (pot_index, pot) in pots.iter().enumerate() {
        let contenders: Vec<&(usize, PlayerId, [Card; 2], HandStrength)> = entries
            .iter()
            .filter(|(_, player, ..)| pot.eligible.contains(player))
            .collect();
        let best_score = match contenders.iter().map(|(.., s)| s.score).max() {
            Some(score) => score,
            None => continue,
        };
        let tied: Vec<_> = contenders
            .into_iter()
            .filter(|(.., s)| s.score == best_score)
            .collect();

        if tied
            .iter()
            .any(|(.., s)| s.class != tied[0].3.class)
        {
            alert = Some(format!(
                "equal score {} spans different rank classes in pot {}",
                best_score, pot_index
            ));
        }

        for (i, share) in split_award(pot.amount, tied.len()).into_iter().enumerate() {
            let (_, player, _, strength) = tied[i];
            winners.push(PotAward {
                player: *player,
                pot_index,
                amount: share,
                hand_name: Some(strength.class.name().to_string()),
            });
        }
    }

    let reveals = entries
        .iter()
        .map(|(seat, player, hole, strength)| Reveal {
            player: *player,
            seat: *seat,
            hole_cards: *hole,
            hand_name: strength.class.name().to_string(),
            score: strength.score,
            best_five: strength.best_five,
        })
        .collect();

    let results = HandResults {
        kind: ResultKind::Showdown,
        pots,
        winners,
        reveals,
        revealed_seed: Some(state.seed),
    };
    Ok((results, alert))
}

/// Awards every pot to the single seat left in the hand. No cards are
/// revealed and the seed stays secret.
pub(crate) fn resolve_last_standing(seats: &[SeatSnapshot]) -> Result<HandResults, EngineError> {
    let survivor = seats
        .iter()
        .find(|s| s.in_hand())
        .ok_or_else(|| EngineError::CorruptLog("hand ended with no seat left in it".into()))?;

    let pots = compute_pots(seats);
    let winners = pots
        .iter()
        .enumerate()
        .map(|(pot_index, pot)| PotAward {
            player: survivor.player,
            pot_index,
            amount: pot.amount,
            hand_name: None,
        })
        .collect();

    Ok(HandResults {
        kind: ResultKind::LastStanding,
        pots,
        winners,
        reveals: Vec::new(),
        revealed_seed: None,
    })
}

/// Splits `amount` evenly over `n` winners; the first winner in order takes
/// the remainder chips.
fn split_award(amount: Chips, n: usize) -> Vec<Chips> {
    let n = n as Chips;
    let share = amount / n;
    let remainder = amount % n;
    (0..n)
        .map(|i| if i == 0 { share + remainder } else { share })
        .collect()
}

/// Orders seats around the ring starting just after the dealer.
fn ring_position(seat: usize, dealer_seat: usize) -> (bool, usize) {
    (seat <= dealer_seat, seat)
}
