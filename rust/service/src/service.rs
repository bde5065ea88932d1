use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use felt_engine::betting::{self, ActionIntent};
use felt_engine::deck::Deck;
use felt_engine::history::{HandRecord, HistoryWriter};
use felt_engine::seat::{Chips, PlayerId};
use felt_engine::state::{HandConfig, HandState};

use crate::deadline::DeadlinePolicy;
use crate::errors::ServiceError;
use crate::events::{EventBus, TableEvent};
use crate::snapshot::{owner_snapshot, public_snapshot, OwnerSnapshot, PublicSnapshot};
use crate::store::{HandStore, StoreError, StoredHand};

/// Inbound action, already identity-verified by the session collaborator.
/// `amount` is required only for raises and names the *total* target bet
/// level, not an increment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionRequest {
    pub table_id: String,
    pub hand_id: String,
    pub player: PlayerId,
    pub action: ActionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Chips>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

/// Success acknowledgement carrying the committed version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionAck {
    pub hand_id: String,
    pub version: u64,
}

/// The server-authoritative hand service.
///
/// Each call performs one read-compute-commit cycle: state is read (seat
/// snapshots replayed from the action log), the engine computes the full
/// transition, and the store applies it under a version compare-and-swap.
/// A lost race surfaces as [`ServiceError::Superseded`] with nothing
/// written; the caller refreshes and retries if it still wants to.
pub struct HandService {
    store: Arc<dyn HandStore>,
    bus: EventBus,
    policy: DeadlinePolicy,
    history: Option<Arc<Mutex<HistoryWriter>>>,
}

impl HandService {
    pub fn new(store: Arc<dyn HandStore>, bus: EventBus) -> Self {
        Self {
            store,
            bus,
            policy: DeadlinePolicy::default(),
            history: None,
        }
    }

    pub fn with_policy(mut self, policy: DeadlinePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Writes every completed hand to a JSONL audit trail.
    pub fn with_history(mut self, writer: HistoryWriter) -> Self {
        self.history = Some(Arc::new(Mutex::new(writer)));
        self
    }

    /// Begins a new deal for a table: secret seed, shuffled deck, blinds
    /// posted, first actor put on the clock. Emits the opening snapshot.
    pub fn start_hand(&self, config: HandConfig) -> Result<PublicSnapshot, ServiceError> {
        let hand_id = Uuid::new_v4().to_string();
        let seed = Deck::fresh_seed();

        tracing::info!(
            table_id = %config.table_id,
            hand_id = %hand_id,
            hand_no = config.hand_no,
            "starting new hand"
        );

        let mut transition = betting::begin_hand(hand_id, &config, seed)?;
        self.stamp_deadline(&mut transition.state);
        let stored = StoredHand {
            state: transition.state,
            log: transition.appended,
        };
        self.store.insert(stored.clone())?;
        self.after_commit(&stored, transition.fairness_alert)?;
        public_snapshot(&stored.state, &stored.log).map_err(Into::into)
    }

    /// Validates and applies one player action.
    ///
    /// If the hand's action deadline has already passed, the current actor
    /// is force-folded first, whoever made this request, and the caller's
    /// own intent is then processed against the state that produced.
    pub fn submit_action(&self, request: &ActionRequest) -> Result<ActionAck, ServiceError> {
        let intent = intent_from(request)?;
        let stored = self.load_checked(&request.table_id, &request.hand_id)?;
        let stored = self.enforce_deadline(stored)?;

        let seat = stored
            .state
            .roster
            .iter()
            .find(|s| s.player == request.player)
            .map(|s| s.seat)
            .ok_or(ServiceError::NotYourTurn)?;

        tracing::debug!(
            hand_id = %request.hand_id,
            player = request.player,
            seat = seat,
            action = ?request.action,
            "processing player action"
        );

        let mut transition = betting::apply_action(&stored.state, &stored.log, seat, intent)?;
        self.stamp_deadline(&mut transition.state);

        let expected = stored.state.version;
        let version = self.store.commit(
            &request.hand_id,
            expected,
            transition.state.clone(),
            transition.appended.clone(),
        )?;

        transition.state.version = version;
        let mut log = stored.log;
        log.extend(transition.appended);
        let committed = StoredHand {
            state: transition.state,
            log,
        };
        self.after_commit(&committed, transition.fairness_alert)?;

        Ok(ActionAck {
            hand_id: request.hand_id.clone(),
            version,
        })
    }

    /// The public view of a hand, rebuilt from the log on every read.
    pub fn snapshot(&self, table_id: &str, hand_id: &str) -> Result<PublicSnapshot, ServiceError> {
        let stored = self.load_checked(table_id, hand_id)?;
        public_snapshot(&stored.state, &stored.log).map_err(Into::into)
    }

    /// One player's own view, with their hole cards and nobody else's.
    pub fn snapshot_for(
        &self,
        table_id: &str,
        hand_id: &str,
        player: PlayerId,
    ) -> Result<OwnerSnapshot, ServiceError> {
        let stored = self.load_checked(table_id, hand_id)?;
        owner_snapshot(&stored.state, &stored.log, player).map_err(Into::into)
    }

    pub fn event_bus(&self) -> EventBus {
        self.bus.clone()
    }

    fn load_checked(&self, table_id: &str, hand_id: &str) -> Result<StoredHand, ServiceError> {
        let stored = self.store.load(hand_id)?;
        if stored.state.table_id != table_id {
            return Err(ServiceError::HandNotFound(hand_id.to_string()));
        }
        Ok(stored)
    }

    /// Expired turn clock: fold the delinquent actor as its own committed
    /// transition before anything else proceeds. Losing the commit race here
    /// just means another request already moved the hand along.
    fn enforce_deadline(&self, stored: StoredHand) -> Result<StoredHand, ServiceError> {
        let now = Utc::now();
        if stored.state.results.is_some()
            || !DeadlinePolicy::expired(stored.state.deadline, now)
        {
            return Ok(stored);
        }

        tracing::info!(
            hand_id = %stored.state.id,
            seat = ?stored.state.current_seat,
            "action deadline expired, forcing a fold"
        );

        let mut transition = betting::apply_timeout_fold(&stored.state, &stored.log)?;
        self.stamp_deadline(&mut transition.state);

        match self.store.commit(
            &stored.state.id,
            stored.state.version,
            transition.state.clone(),
            transition.appended.clone(),
        ) {
            Ok(version) => {
                transition.state.version = version;
                let mut log = stored.log;
                log.extend(transition.appended);
                let committed = StoredHand {
                    state: transition.state,
                    log,
                };
                self.after_commit(&committed, transition.fairness_alert)?;
                Ok(committed)
            }
            Err(StoreError::Superseded { .. }) => {
                self.store.load(&stored.state.id).map_err(Into::into)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn stamp_deadline(&self, state: &mut HandState) {
        state.deadline = state
            .current_seat
            .map(|_| self.policy.next_deadline(Utc::now()));
    }

    /// Emits the post-commit snapshot, and on completion the one and only
    /// hand-result event plus the audit record.
    fn after_commit(
        &self,
        stored: &StoredHand,
        fairness_alert: Option<String>,
    ) -> Result<(), ServiceError> {
        if let Some(msg) = fairness_alert {
            tracing::error!(
                hand_id = %stored.state.id,
                "hand evaluator integrity violation: {msg}"
            );
        }

        let snapshot = public_snapshot(&stored.state, &stored.log)?;
        self.bus.broadcast(
            &stored.state.table_id,
            TableEvent::StateUpdated {
                table_id: stored.state.table_id.clone(),
                hand_id: stored.state.id.clone(),
                snapshot,
            },
        );

        if let Some(results) = &stored.state.results {
            self.bus.broadcast(
                &stored.state.table_id,
                TableEvent::HandCompleted {
                    table_id: stored.state.table_id.clone(),
                    hand_id: stored.state.id.clone(),
                    result: results.clone(),
                },
            );
            if let Some(history) = &self.history {
                let record = HandRecord::from_completed(&stored.state, &stored.log)?;
                let mut writer = history
                    .lock()
                    .map_err(|_| ServiceError::Internal("history writer poisoned".into()))?;
                writer
                    .write(&record)
                    .map_err(|e| ServiceError::Internal(e.to_string()))?;
            }
        }
        Ok(())
    }
}

fn intent_from(request: &ActionRequest) -> Result<ActionIntent, ServiceError> {
    Ok(match request.action {
        ActionType::Fold => ActionIntent::Fold,
        ActionType::Check => ActionIntent::Check,
        ActionType::Call => ActionIntent::Call,
        ActionType::Raise => {
            let to = request
                .amount
                .ok_or_else(|| ServiceError::Malformed("raise requires an amount".into()))?;
            ActionIntent::Raise { to }
        }
        ActionType::AllIn => ActionIntent::AllIn,
    })
}
