use serde::{Deserialize, Serialize};

use crate::seat::{Chips, PlayerId};
use crate::state::Phase;

/// Every kind of decision that can appear in the action log. A closed set:
/// adding an action is a compile-time affair, and every dispatch over it is
/// an exhaustive match.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    PostBlind,
    PostAnte,
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

/// One append-only, sequence-numbered log entry per player decision.
///
/// The log is the single source of truth for seat state: snapshots are
/// reconstructed from it on every read, and entries are never mutated or
/// deleted.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: PlayerId,
    pub seat: usize,
    pub kind: ActionKind,
    /// Chips moved from the seat's stack by this action.
    pub amount: Chips,
    pub phase: Phase,
    pub sequence: u64,
    /// Set only on folds forced by an expired action deadline.
    #[serde(default)]
    pub timed_out: bool,
}
