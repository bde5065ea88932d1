use serde::{Deserialize, Serialize};

use crate::action::{ActionKind, ActionRecord};
use crate::errors::EngineError;
use crate::state::Phase;

pub type PlayerId = u64;
pub type Chips = u32;

/// Where a seat stands in the current hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatStatus {
    Active,
    Folded,
    AllIn,
    /// Sitting out when the hand began; excluded from turn order and pot
    /// eligibility for this hand only.
    NonParticipant,
}

/// Roster entry supplied by the table collaborator when the hand begins.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeatConfig {
    pub player: PlayerId,
    pub seat: usize,
    pub stack: Chips,
    #[serde(default)]
    pub sitting_out: bool,
}

/// Per-seat view of the hand, derived by replaying the action log.
///
/// Never stored: the log is the source of truth and the snapshot is
/// recomputed on every read. Invariant: `stack + total_bet` equals the
/// starting stack for the whole hand.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SeatSnapshot {
    pub player: PlayerId,
    pub seat: usize,
    pub stack: Chips,
    pub status: SeatStatus,
    pub round_bet: Chips,
    pub total_bet: Chips,
    /// Whether the seat has acted since the last full bet or raise.
    pub has_acted: bool,
    /// Deadline-forced folds this hand; feeds later disciplinary policy.
    pub timeouts: u32,
}

impl SeatSnapshot {
    pub fn in_hand(&self) -> bool {
        matches!(self.status, SeatStatus::Active | SeatStatus::AllIn)
    }
}

/// Replays the append-only action log over the starting roster and returns
/// the seats in seat-number order.
///
/// Round-scoped fields (`round_bet`, `has_acted`) reset at every street
/// boundary; a full raise clears every other active seat's `has_acted`,
/// while an all-in for less than the minimum raise does not.
pub fn replay(
    roster: &[SeatConfig],
    log: &[ActionRecord],
    current_phase: Phase,
    big_blind: Chips,
) -> Result<Vec<SeatSnapshot>, EngineError> {
    let mut seats: Vec<SeatSnapshot> = roster
        .iter()
        .map(|cfg| SeatSnapshot {
            player: cfg.player,
            seat: cfg.seat,
            stack: cfg.stack,
            status: if cfg.sitting_out || cfg.stack == 0 {
                SeatStatus::NonParticipant
            } else {
                SeatStatus::Active
            },
            round_bet: 0,
            total_bet: 0,
            has_acted: false,
            timeouts: 0,
        })
        .collect();
    seats.sort_by_key(|s| s.seat);

    let mut round_phase = Phase::Preflop;
    // The big blind is the bet to beat preflop and the raise floor everywhere.
    let mut current_bet: Chips = big_blind;
    let mut min_raise: Chips = big_blind;

    for (i, rec) in log.iter().enumerate() {
        if rec.sequence != i as u64 {
            return Err(EngineError::CorruptLog(format!(
                "sequence {} at log index {}",
                rec.sequence, i
            )));
        }
        if rec.phase != round_phase {
            round_phase = rec.phase;
            current_bet = 0;
            min_raise = big_blind;
            for s in seats.iter_mut() {
                s.round_bet = 0;
                s.has_acted = false;
            }
        }

        let idx = seats
            .iter()
            .position(|s| s.seat == rec.seat)
            .ok_or(EngineError::SeatNotFound(rec.seat))?;
        let mut reopen = false;
        {
            let s = &mut seats[idx];
            if rec.amount > s.stack {
                return Err(EngineError::CorruptLog(format!(
                    "seat {} moved {} with stack {}",
                    s.seat, rec.amount, s.stack
                )));
            }
            match rec.kind {
                ActionKind::PostAnte => {
                    s.stack -= rec.amount;
                    s.total_bet += rec.amount;
                }
                ActionKind::PostBlind => {
                    s.stack -= rec.amount;
                    s.round_bet += rec.amount;
                    s.total_bet += rec.amount;
                    current_bet = current_bet.max(s.round_bet);
                }
                ActionKind::Fold => {
                    s.status = SeatStatus::Folded;
                    if rec.timed_out {
                        s.timeouts += 1;
                    }
                }
                ActionKind::Check => {
                    s.has_acted = true;
                }
                ActionKind::Call => {
                    s.stack -= rec.amount;
                    s.round_bet += rec.amount;
                    s.total_bet += rec.amount;
                    s.has_acted = true;
                }
                ActionKind::Raise | ActionKind::AllIn => {
                    s.stack -= rec.amount;
                    s.round_bet += rec.amount;
                    s.total_bet += rec.amount;
                    s.has_acted = true;
                    if s.round_bet > current_bet {
                        let increment = s.round_bet - current_bet;
                        current_bet = s.round_bet;
                        if increment >= min_raise {
                            min_raise = increment;
                            reopen = true;
                        }
                    }
                }
            }
            if s.stack == 0 && s.in_hand() {
                s.status = SeatStatus::AllIn;
            }
        }
        if reopen {
            for other in seats.iter_mut() {
                if other.seat != rec.seat && other.status == SeatStatus::Active {
                    other.has_acted = false;
                }
            }
        }
    }

    // The street may have advanced past the last logged record: a freshly
    // dealt round starts with clean round-scoped fields.
    if current_phase != round_phase {
        for s in seats.iter_mut() {
            s.round_bet = 0;
            s.has_acted = false;
        }
    }

    Ok(seats)
}
