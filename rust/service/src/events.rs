use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;

use felt_engine::showdown::HandResults;

use crate::snapshot::PublicSnapshot;

pub type TableId = String;

// Bounded channels so one slow subscriber cannot exhaust memory; events to a
// full channel are dropped and the subscriber pruned.
const EVENT_CHANNEL_BUFFER: usize = 1000;

pub type EventSender = mpsc::Sender<TableEvent>;
pub type EventReceiver = mpsc::Receiver<TableEvent>;

/// What the realtime collaborator fans out to clients.
///
/// `StateUpdated` follows every successful commit and is always secret-free.
/// `HandCompleted` fires exactly once per hand and is the only place the
/// shuffle seed and the contenders' hole cards ever appear.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableEvent {
    StateUpdated {
        table_id: TableId,
        hand_id: String,
        snapshot: PublicSnapshot,
    },
    HandCompleted {
        table_id: TableId,
        hand_id: String,
        result: HandResults,
    },
}

pub struct EventSubscription {
    bus: EventBus,
    table_id: TableId,
    subscriber_id: usize,
    pub receiver: EventReceiver,
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        self.bus.unsubscribe(&self.table_id, self.subscriber_id);
    }
}

/// Per-table fan-out to realtime subscribers.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    inner: Arc<EventBusInner>,
}

#[derive(Debug, Default)]
struct EventBusInner {
    subscribers: RwLock<HashMap<TableId, Vec<(usize, EventSender)>>>,
    next_id: AtomicUsize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, table_id: TableId) -> EventSubscription {
        let (tx, receiver) = mpsc::channel(EVENT_CHANNEL_BUFFER);
        let subscriber_id = self.inner.next_id.fetch_add(1, Ordering::AcqRel);
        {
            let mut guard = self
                .inner
                .subscribers
                .write()
                .expect("subscriber lock poisoned");
            guard
                .entry(table_id.clone())
                .or_default()
                .push((subscriber_id, tx));
        }

        tracing::info!(
            table_id = %table_id,
            subscriber_id = subscriber_id,
            "client subscribed to table events"
        );

        EventSubscription {
            bus: self.clone(),
            table_id,
            subscriber_id,
            receiver,
        }
    }

    pub fn broadcast(&self, table_id: &TableId, event: TableEvent) {
        tracing::debug!(
            table_id = %table_id,
            event_type = ?std::mem::discriminant(&event),
            "broadcasting table event"
        );

        let subscribers = {
            let guard = self
                .inner
                .subscribers
                .read()
                .expect("subscriber lock poisoned");
            guard.get(table_id).cloned()
        };

        let Some(list) = subscribers else {
            return;
        };
        let mut failed = Vec::new();
        for (id, sender) in list {
            if let Err(e) = sender.try_send(event.clone()) {
                tracing::warn!(
                    table_id = %table_id,
                    subscriber_id = id,
                    error = ?e,
                    "failed to send event to subscriber"
                );
                failed.push(id);
            }
        }
        if !failed.is_empty() {
            self.remove_subscribers(table_id, &failed);
        }
    }

    pub fn unsubscribe(&self, table_id: &TableId, subscriber_id: usize) {
        self.remove_subscribers(table_id, &[subscriber_id]);
    }

    pub fn subscriber_count(&self) -> usize {
        let guard = self
            .inner
            .subscribers
            .read()
            .expect("subscriber lock poisoned");
        guard.values().map(|list| list.len()).sum()
    }

    fn remove_subscribers(&self, table_id: &TableId, ids: &[usize]) {
        let mut guard = self
            .inner
            .subscribers
            .write()
            .expect("subscriber lock poisoned");
        if let Some(list) = guard.get_mut(table_id) {
            list.retain(|(id, _)| !ids.contains(id));
            if list.is_empty() {
                guard.remove(table_id);
            }
        }
    }
}
