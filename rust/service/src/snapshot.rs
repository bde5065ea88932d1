//! Secret-free state views for broadcast.
//!
//! Hole cards and the undealt remainder of the deck never leave the server:
//! the public snapshot carries only what every observer may see, and the
//! owner view adds exactly one player's own hole cards. The seed is absent
//! from every snapshot; it surfaces only in the hand-result event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use felt_engine::action::{ActionKind, ActionRecord};
use felt_engine::cards::Card;
use felt_engine::errors::EngineError;
use felt_engine::pot::{compute_pots, Pot};
use felt_engine::seat::{replay, Chips, PlayerId, SeatStatus};
use felt_engine::state::{HandState, Phase};

/// What one seat shows to the table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatView {
    pub seat: usize,
    pub player: PlayerId,
    pub stack: Chips,
    pub status: SeatStatus,
    pub round_bet: Chips,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_action: Option<ActionKind>,
    pub has_cards: bool,
}

/// The public view of a hand, emitted after every successful commit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicSnapshot {
    pub table_id: String,
    pub hand_id: String,
    pub hand_no: u64,
    pub phase: Phase,
    pub board: Vec<Card>,
    pub pots: Vec<Pot>,
    pub seats: Vec<SeatView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_seat: Option<usize>,
    pub current_bet: Chips,
    pub min_raise: Chips,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    pub version: u64,
}

/// One player's own view: the public snapshot plus their hole cards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OwnerSnapshot {
    #[serde(flatten)]
    pub public: PublicSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hole_cards: Option<[Card; 2]>,
}

/// Rebuilds the public view from the hand record and its action log. Seat
/// state is replayed from the log on every read; pots are recomputed from
/// the replayed snapshots.
pub fn public_snapshot(
    state: &HandState,
    log: &[ActionRecord],
) -> Result<PublicSnapshot, EngineError> {
    let seats = replay(&state.roster, log, state.phase, state.rules.big_blind)?;
    let pots = compute_pots(&seats);
    let views = seats
        .iter()
        .map(|s| SeatView {
            seat: s.seat,
            player: s.player,
            stack: s.stack,
            status: s.status,
            round_bet: s.round_bet,
            last_action: log
                .iter()
                .rev()
                .find(|r| r.seat == s.seat && r.phase == state.phase)
                .map(|r| r.kind),
            has_cards: s.in_hand(),
        })
        .collect();
    Ok(PublicSnapshot {
        table_id: state.table_id.clone(),
        hand_id: state.id.clone(),
        hand_no: state.hand_no,
        phase: state.phase,
        board: state.board.clone(),
        pots,
        seats: views,
        current_seat: state.current_seat,
        current_bet: state.current_bet,
        min_raise: state.min_raise,
        deadline: state.deadline,
        version: state.version,
    })
}

/// The view for one authenticated player. Only a seat's owner ever receives
/// its hole cards.
pub fn owner_snapshot(
    state: &HandState,
    log: &[ActionRecord],
    player: PlayerId,
) -> Result<OwnerSnapshot, EngineError> {
    let public = public_snapshot(state, log)?;
    let hole_cards = match state.roster.iter().find(|s| s.player == player) {
        Some(cfg) => state.hole_cards_for(cfg.seat)?,
        None => None,
    };
    Ok(OwnerSnapshot { public, hole_cards })
}
