use crate::action::{ActionKind, ActionRecord};
use crate::deck::Deck;
use crate::errors::EngineError;
use crate::rules::{validate_action, ValidatedAction};
use crate::seat::{replay, Chips, SeatSnapshot, SeatStatus};
use crate::showdown;
use crate::state::{HandConfig, HandId, HandState, Phase};

/// A player's declared intent, as it arrives from the session layer. Raise
/// amounts are the total target bet level for the round.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ActionIntent {
    Fold,
    Check,
    Call,
    Raise { to: Chips },
    AllIn,
}

/// The full effect of one accepted mutation, computed before anything is
/// persisted. Either the whole transition commits or none of it does.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: HandState,
    pub appended: Vec<ActionRecord>,
    /// Set when the evaluator produced equal scores for different rank
    /// classes. That is a bug signal, not a game outcome.
    pub fairness_alert: Option<String>,
}

impl Transition {
    pub fn completed(&self) -> bool {
        self.state.phase == Phase::Complete
    }
}

/// Creates a new hand: deals hole cards from the seeded shuffle, posts antes
/// and blinds as log records, and seats the first actor after the big blind.
///
/// Heads-up, the dealer posts the small blind and acts first preflop. If the
/// blinds already leave nobody able to act, the board is run out and the
/// hand resolves immediately.
pub fn begin_hand(id: HandId, config: &HandConfig, seed: u64) -> Result<Transition, EngineError> {
    let rules = &config.rules;
    if rules.big_blind == 0 || rules.small_blind == 0 || rules.small_blind > rules.big_blind {
        return Err(EngineError::InvalidConfig(format!(
            "unplayable blinds {}/{}",
            rules.small_blind, rules.big_blind
        )));
    }
    let mut roster = config.roster.clone();
    roster.sort_by_key(|s| s.seat);
    if roster.len() > 10 {
        return Err(EngineError::InvalidConfig(
            "a table holds at most ten seats".into(),
        ));
    }
    if roster.windows(2).any(|w| w[0].seat == w[1].seat) {
        return Err(EngineError::InvalidConfig("duplicate seat number".into()));
    }
    for (i, a) in roster.iter().enumerate() {
        if roster.iter().skip(i + 1).any(|b| b.player == a.player) {
            return Err(EngineError::InvalidConfig(format!(
                "player {} holds two seats",
                a.player
            )));
        }
    }
    if !roster.iter().any(|s| s.seat == config.dealer_seat) {
        return Err(EngineError::InvalidConfig(
            "dealer seat is not in the roster".into(),
        ));
    }

    let participants: Vec<(usize, u64, Chips)> = roster
        .iter()
        .filter(|s| !s.sitting_out && s.stack > 0)
        .map(|s| (s.seat, s.player, s.stack))
        .collect();
    if participants.len() < 2 {
        return Err(EngineError::TooFewPlayers);
    }

    let (sb_seat, bb_seat) = blind_seats(&participants, config.dealer_seat);

    let mut state = HandState {
        id,
        table_id: config.table_id.clone(),
        hand_no: config.hand_no,
        phase: Phase::Preflop,
        board: Vec::new(),
        current_bet: rules.big_blind,
        min_raise: rules.big_blind,
        dealer_seat: config.dealer_seat,
        small_blind_seat: sb_seat,
        big_blind_seat: bb_seat,
        current_seat: None,
        deadline: None,
        seed,
        revealed_seed: None,
        version: 0,
        results: None,
        rules: rules.clone(),
        roster,
    };

    let mut remaining: Vec<(usize, u64, Chips)> = participants.clone();
    let mut appended: Vec<ActionRecord> = Vec::new();
    let mut post = |seat: usize, kind: ActionKind, wanted: Chips, appended: &mut Vec<ActionRecord>,
                    remaining: &mut Vec<(usize, u64, Chips)>| {
        if let Some(entry) = remaining.iter_mut().find(|(s, ..)| *s == seat) {
            let amount = wanted.min(entry.2);
            if amount > 0 {
                entry.2 -= amount;
                appended.push(ActionRecord {
                    player: entry.1,
                    seat,
                    kind,
                    amount,
                    phase: Phase::Preflop,
                    sequence: appended.len() as u64,
                    timed_out: false,
                });
            }
        }
    };

    if rules.ante > 0 {
        for &(seat, ..) in &participants {
            post(seat, ActionKind::PostAnte, rules.ante, &mut appended, &mut remaining);
        }
    }
    post(sb_seat, ActionKind::PostBlind, rules.small_blind, &mut appended, &mut remaining);
    post(bb_seat, ActionKind::PostBlind, rules.big_blind, &mut appended, &mut remaining);

    let fairness_alert = settle(&mut state, &appended, bb_seat)?;
    Ok(Transition {
        state,
        appended,
        fairness_alert,
    })
}

/// Validates one action against the current state and computes the resulting
/// transition: the appended log record, any street advance or showdown, the
/// next actor.
pub fn apply_action(
    state: &HandState,
    log: &[ActionRecord],
    actor_seat: usize,
    intent: ActionIntent,
) -> Result<Transition, EngineError> {
    if state.phase >= Phase::Showdown || state.results.is_some() {
        return Err(EngineError::HandComplete);
    }
    if state.current_seat != Some(actor_seat) {
        return Err(EngineError::NotYourTurn(actor_seat));
    }

    let seats = replay(&state.roster, log, state.phase, state.rules.big_blind)?;
    let actor = seats
        .iter()
        .find(|s| s.seat == actor_seat)
        .ok_or(EngineError::SeatNotFound(actor_seat))?;
    if actor.status != SeatStatus::Active {
        return Err(EngineError::CorruptLog(format!(
            "current actor seat {} cannot act",
            actor_seat
        )));
    }

    let validated = validate_action(
        actor.stack,
        actor.round_bet,
        state.current_bet,
        state.min_raise,
        intent,
    )?;
    let (kind, amount) = match validated {
        ValidatedAction::Fold => (ActionKind::Fold, 0),
        ValidatedAction::Check => (ActionKind::Check, 0),
        ValidatedAction::Call(amount) => (ActionKind::Call, amount),
        ValidatedAction::RaiseTo { spend, .. } => (ActionKind::Raise, spend),
        ValidatedAction::AllIn(amount) => (ActionKind::AllIn, amount),
    };

    let mut next = state.clone();
    let new_round_bet = actor.round_bet + amount;
    if matches!(kind, ActionKind::Raise | ActionKind::AllIn) && new_round_bet > next.current_bet {
        let increment = new_round_bet - next.current_bet;
        next.current_bet = new_round_bet;
        if increment >= next.min_raise {
            next.min_raise = increment;
        }
    }

    let record = ActionRecord {
        player: actor.player,
        seat: actor_seat,
        kind,
        amount,
        phase: state.phase,
        sequence: log.len() as u64,
        timed_out: false,
    };
    finish(next, log, record)
}

/// Folds the current actor after their deadline expired. Any authenticated
/// request may trigger this, so a hand can never stall on one absent player;
/// the caller's own intent is processed against the state this produces.
pub fn apply_timeout_fold(
    state: &HandState,
    log: &[ActionRecord],
) -> Result<Transition, EngineError> {
    if state.phase >= Phase::Showdown || state.results.is_some() {
        return Err(EngineError::HandComplete);
    }
    let actor_seat = state
        .current_seat
        .ok_or_else(|| EngineError::CorruptLog("deadline set with no actor".into()))?;
    let seats = replay(&state.roster, log, state.phase, state.rules.big_blind)?;
    let actor = seats
        .iter()
        .find(|s| s.seat == actor_seat)
        .ok_or(EngineError::SeatNotFound(actor_seat))?;

    let record = ActionRecord {
        player: actor.player,
        seat: actor_seat,
        kind: ActionKind::Fold,
        amount: 0,
        phase: state.phase,
        sequence: log.len() as u64,
        timed_out: true,
    };
    finish(state.clone(), log, record)
}

fn finish(
    mut state: HandState,
    log: &[ActionRecord],
    record: ActionRecord,
) -> Result<Transition, EngineError> {
    let mut full = log.to_vec();
    full.push(record.clone());
    let fairness_alert = settle(&mut state, &full, record.seat)?;
    Ok(Transition {
        state,
        appended: vec![record],
        fairness_alert,
    })
}

/// Decides what the hand does after a mutation: keep the round open and seat
/// the next actor, advance to the next street, run the board out, or resolve.
fn settle(
    state: &mut HandState,
    log: &[ActionRecord],
    last_seat: usize,
) -> Result<Option<String>, EngineError> {
    let seats = replay(&state.roster, log, state.phase, state.rules.big_blind)?;

    let in_hand = seats.iter().filter(|s| s.in_hand()).count();
    if in_hand <= 1 {
        // Everyone else folded: the survivor takes the pot uncontested,
        // skipping remaining streets and showdown entirely.
        state.results = Some(showdown::resolve_last_standing(&seats)?);
        state.phase = Phase::Complete;
        state.current_seat = None;
        state.deadline = None;
        return Ok(None);
    }

    let active: Vec<&SeatSnapshot> = seats
        .iter()
        .filter(|s| s.status == SeatStatus::Active)
        .collect();
    // Closed when every seat that can still act has acted since the last
    // full raise and has matched the current bet. An all-in for more than a
    // seat's stack can cover is matched by calling for less, which takes the
    // seat out of the active set.
    let closed = active.is_empty()
        || active
            .iter()
            .all(|s| s.has_acted && s.round_bet == state.current_bet);

    if !closed {
        state.current_seat = Some(
            next_active_seat(&seats, last_seat)
                .ok_or_else(|| EngineError::CorruptLog("open round with no actor".into()))?,
        );
        return Ok(None);
    }

    if state.phase == Phase::River || active.len() <= 1 {
        // River betting is done, or nobody can act anymore: deal whatever
        // streets remain in one step and resolve the showdown.
        deal_board_to(state, 5)?;
        state.phase = Phase::Showdown;
        let (results, alert) = showdown::resolve_showdown(state, &seats)?;
        state.results = Some(results);
        state.revealed_seed = Some(state.seed);
        state.phase = Phase::Complete;
        state.current_seat = None;
        state.deadline = None;
        return Ok(alert);
    }

    let next = state.phase.next();
    deal_board_to(state, next.board_len())?;
    state.phase = next;
    state.current_bet = 0;
    state.min_raise = state.rules.big_blind;
    state.current_seat = Some(
        next_active_seat(&seats, state.dealer_seat)
            .ok_or_else(|| EngineError::CorruptLog("fresh round with no actor".into()))?,
    );
    Ok(None)
}

/// Extends the board from the deck offsets left by hole-card dealing. The
/// deck is never re-shuffled mid-hand.
fn deal_board_to(state: &mut HandState, target: usize) -> Result<(), EngineError> {
    if state.board.len() >= target {
        return Ok(());
    }
    let mut deck = Deck::new_with_seed(state.seed);
    deck.skip(2 * state.participants().len() + state.board.len());
    while state.board.len() < target {
        state
            .board
            .push(deck.deal_card().ok_or(EngineError::DeckExhausted)?);
    }
    Ok(())
}

/// First seat in seat-number order after `after`, wrapping around the ring,
/// that can still act. Folded, all-in and non-participant seats are skipped.
fn next_active_seat(seats: &[SeatSnapshot], after: usize) -> Option<usize> {
    seats
        .iter()
        .filter(|s| s.status == SeatStatus::Active && s.seat > after)
        .map(|s| s.seat)
        .next()
        .or_else(|| {
            seats
                .iter()
                .filter(|s| s.status == SeatStatus::Active)
                .map(|s| s.seat)
                .next()
        })
}

/// Small blind and big blind seats for this deal. Heads-up the dealer is the
/// small blind; otherwise the blinds are the next two participants after the
/// dealer.
fn blind_seats(participants: &[(usize, u64, Chips)], dealer_seat: usize) -> (usize, usize) {
    let next_after = |after: usize| -> usize {
        participants
            .iter()
            .map(|(s, ..)| *s)
            .find(|&s| s > after)
            .or_else(|| participants.first().map(|(s, ..)| *s))
            .unwrap_or(after)
    };
    if participants.len() == 2 {
        let sb = if participants.iter().any(|(s, ..)| *s == dealer_seat) {
            dealer_seat
        } else {
            next_after(dealer_seat)
        };
        let bb = next_after(sb);
        (sb, bb)
    } else {
        let sb = next_after(dealer_seat);
        let bb = next_after(sb);
        (sb, bb)
    }
}
