use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::EngineError;
use crate::seat::{Chips, SeatConfig};
use crate::showdown::HandResults;

pub type HandId = String;

/// Betting rounds in order, plus the two terminal stages.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    Complete,
}

impl Phase {
    pub fn next(self) -> Phase {
        match self {
            Phase::Preflop => Phase::Flop,
            Phase::Flop => Phase::Turn,
            Phase::Turn => Phase::River,
            Phase::River => Phase::Showdown,
            Phase::Showdown | Phase::Complete => Phase::Complete,
        }
    }

    /// Community cards on the board once this phase is reached.
    pub fn board_len(self) -> usize {
        match self {
            Phase::Preflop => 0,
            Phase::Flop => 3,
            Phase::Turn => 4,
            Phase::River | Phase::Showdown | Phase::Complete => 5,
        }
    }
}

/// Stakes for the hand, owned by the table collaborator and only read here.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TableRules {
    pub small_blind: Chips,
    pub big_blind: Chips,
    #[serde(default)]
    pub ante: Chips,
}

/// Everything the table layer provides to start a deal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandConfig {
    pub table_id: String,
    /// Monotonic per table.
    pub hand_no: u64,
    pub rules: TableRules,
    pub dealer_seat: usize,
    pub roster: Vec<SeatConfig>,
}

/// The authoritative record of one deal.
///
/// Mutated exclusively through the betting state machine and committed under
/// an optimistic version check; immutable once the phase reaches
/// [`Phase::Complete`]. The deck seed is server-only until a showdown
/// reveals it, so this type deliberately does not implement `Serialize`.
#[derive(Debug, Clone)]
pub struct HandState {
    pub id: HandId,
    pub table_id: String,
    pub hand_no: u64,
    pub phase: Phase,
    /// Community cards, append-only within a hand.
    pub board: Vec<Card>,
    pub current_bet: Chips,
    pub min_raise: Chips,
    pub dealer_seat: usize,
    pub small_blind_seat: usize,
    pub big_blind_seat: usize,
    pub current_seat: Option<usize>,
    pub deadline: Option<DateTime<Utc>>,
    pub(crate) seed: u64,
    /// Null until showdown, then set for audit.
    pub revealed_seed: Option<u64>,
    pub version: u64,
    pub results: Option<HandResults>,
    pub rules: TableRules,
    /// Roster at deal time, sorted by seat number.
    pub roster: Vec<SeatConfig>,
}

impl HandState {
    /// Seats dealt into this hand, in seat order.
    pub fn participants(&self) -> Vec<&SeatConfig> {
        self.roster
            .iter()
            .filter(|s| !s.sitting_out && s.stack > 0)
            .collect()
    }

    /// Re-derives every participant's hole cards from the secret seed. Two
    /// consecutive cards per participant, in seat order, are consumed before
    /// any community card.
    pub fn hole_cards(&self) -> Result<Vec<(usize, [Card; 2])>, EngineError> {
        let mut deck = Deck::new_with_seed(self.seed);
        let mut out = Vec::new();
        for cfg in self.participants() {
            let first = deck.deal_card().ok_or(EngineError::DeckExhausted)?;
            let second = deck.deal_card().ok_or(EngineError::DeckExhausted)?;
            out.push((cfg.seat, [first, second]));
        }
        Ok(out)
    }

    /// The hole cards dealt to one seat, if it was dealt in.
    pub fn hole_cards_for(&self, seat: usize) -> Result<Option<[Card; 2]>, EngineError> {
        Ok(self
            .hole_cards()?
            .into_iter()
            .find(|(s, _)| *s == seat)
            .map(|(_, cards)| cards))
    }
}
