//! Versioned hand storage with optimistic compare-and-swap commits.
//!
//! No lock is held across a read-compute-write span: a request reads a
//! snapshot, computes the full transition, and commits it only if the stored
//! version has not moved since the read. Of any set of racing commits for
//! one hand, exactly one succeeds per version increment; the rest observe
//! [`StoreError::Superseded`] and abort with no side effects.

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

use felt_engine::action::ActionRecord;
use felt_engine::state::HandState;

/// A hand plus its append-only action log, as the store keeps them.
#[derive(Debug, Clone)]
pub struct StoredHand {
    pub state: HandState,
    pub log: Vec<ActionRecord>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("hand not found: {0}")]
    NotFound(String),
    #[error("hand {hand_id} is at version {actual}, expected {expected}")]
    Superseded {
        hand_id: String,
        expected: u64,
        actual: u64,
    },
    #[error("hand already exists: {0}")]
    Duplicate(String),
    #[error("hand store poisoned")]
    Poisoned,
}

/// Persistence boundary for hands; the storage technology behind it is a
/// collaborator's concern.
pub trait HandStore: Send + Sync {
    fn insert(&self, hand: StoredHand) -> Result<(), StoreError>;

    fn load(&self, hand_id: &str) -> Result<StoredHand, StoreError>;

    /// Applies a computed transition only if the stored version still equals
    /// `expected_version`, then increments it and appends the new records.
    /// Returns the new version, or [`StoreError::Superseded`] if another
    /// commit won the race; nothing is written in that case.
    fn commit(
        &self,
        hand_id: &str,
        expected_version: u64,
        state: HandState,
        appended: Vec<ActionRecord>,
    ) -> Result<u64, StoreError>;
}

/// In-memory reference implementation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    hands: RwLock<HashMap<String, StoredHand>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HandStore for MemoryStore {
    fn insert(&self, hand: StoredHand) -> Result<(), StoreError> {
        let mut guard = self.hands.write().map_err(|_| StoreError::Poisoned)?;
        let id = hand.state.id.clone();
        if guard.contains_key(&id) {
            return Err(StoreError::Duplicate(id));
        }
        guard.insert(id, hand);
        Ok(())
    }

    fn load(&self, hand_id: &str) -> Result<StoredHand, StoreError> {
        let guard = self.hands.read().map_err(|_| StoreError::Poisoned)?;
        guard
            .get(hand_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(hand_id.to_string()))
    }

    fn commit(
        &self,
        hand_id: &str,
        expected_version: u64,
        mut state: HandState,
        appended: Vec<ActionRecord>,
    ) -> Result<u64, StoreError> {
        let mut guard = self.hands.write().map_err(|_| StoreError::Poisoned)?;
        let stored = guard
            .get_mut(hand_id)
            .ok_or_else(|| StoreError::NotFound(hand_id.to_string()))?;
        if stored.state.version != expected_version {
            return Err(StoreError::Superseded {
                hand_id: hand_id.to_string(),
                expected: expected_version,
                actual: stored.state.version,
            });
        }
        let new_version = expected_version + 1;
        state.version = new_version;
        stored.state = state;
        stored.log.extend(appended);
        Ok(new_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    use felt_engine::betting::begin_hand;
    use felt_engine::seat::SeatConfig;
    use felt_engine::state::{HandConfig, TableRules};

    fn seed_hand(store: &MemoryStore) -> StoredHand {
        let config = HandConfig {
            table_id: "t-1".into(),
            hand_no: 1,
            rules: TableRules {
                small_blind: 5,
                big_blind: 10,
                ante: 0,
            },
            dealer_seat: 0,
            roster: vec![
                SeatConfig {
                    player: 1,
                    seat: 0,
                    stack: 500,
                    sitting_out: false,
                },
                SeatConfig {
                    player: 2,
                    seat: 1,
                    stack: 500,
                    sitting_out: false,
                },
            ],
        };
        let t = begin_hand("h-1".into(), &config, 3).expect("begin");
        let stored = StoredHand {
            state: t.state,
            log: t.appended,
        };
        store.insert(stored.clone()).expect("insert");
        stored
    }

    #[test]
    fn commit_increments_the_version_and_appends() {
        let store = MemoryStore::new();
        let stored = seed_hand(&store);
        let version = store
            .commit("h-1", 0, stored.state.clone(), vec![])
            .expect("commit");
        assert_eq!(version, 1);
        assert_eq!(store.load("h-1").unwrap().state.version, 1);
    }

    #[test]
    fn stale_commit_is_superseded_and_writes_nothing() {
        let store = MemoryStore::new();
        let stored = seed_hand(&store);
        store
            .commit("h-1", 0, stored.state.clone(), vec![])
            .expect("first commit");
        let err = store
            .commit("h-1", 0, stored.state.clone(), stored.log.clone())
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Superseded {
                expected: 0,
                actual: 1,
                ..
            }
        ));
        let after = store.load("h-1").unwrap();
        assert_eq!(after.state.version, 1);
        assert_eq!(after.log.len(), stored.log.len(), "losing commit left no trace");
    }

    #[test]
    fn exactly_one_of_two_racing_commits_wins() {
        let store = Arc::new(MemoryStore::new());
        let stored = seed_hand(&store);

        let mut handles = Vec::new();
        for _ in 0..2 {
            let store = Arc::clone(&store);
            let state = stored.state.clone();
            handles.push(thread::spawn(move || {
                store.commit("h-1", 0, state, vec![]).is_ok()
            }));
        }
        let wins: usize = handles
            .into_iter()
            .map(|h| h.join().expect("join") as usize)
            .sum();
        assert_eq!(wins, 1, "version CAS admits exactly one winner");
        assert_eq!(store.load("h-1").unwrap().state.version, 1);
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let store = MemoryStore::new();
        let stored = seed_hand(&store);
        assert!(matches!(
            store.insert(stored),
            Err(StoreError::Duplicate(_))
        ));
    }
}
