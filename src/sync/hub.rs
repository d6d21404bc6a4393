//! Fan-out of snapshots to subscribers over std channels

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use super::{LiveState, Snapshot};

/// Publishes snapshots to every live subscription
#[derive(Default)]
pub struct SnapshotHub {
    subscribers: Mutex<Vec<Sender<Snapshot>>>,
}

impl SnapshotHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new subscription; it receives snapshots published from now on
    pub fn subscribe(&self) -> Subscription {
        let (sender, receiver) = mpsc::channel();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sender);
        Subscription { receiver }
    }

    /// Send `snapshot` to every subscriber, dropping closed ones
    ///
    /// Returns how many subscribers received it.
    pub fn publish(&self, snapshot: Snapshot) -> usize {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|sender| sender.send(snapshot.clone()).is_ok());
        tracing::trace!(
            collection = %snapshot.collection(),
            subscribers = subscribers.len(),
            "snapshot published"
        );
        subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Receiving end of a hub subscription
pub struct Subscription {
    receiver: Receiver<Snapshot>,
}

impl Subscription {
    /// The next pending snapshot, without blocking
    pub fn try_next(&self) -> Option<Snapshot> {
        self.receiver.try_recv().ok()
    }

    /// Wait up to `timeout` for the next snapshot
    ///
    /// `None` on timeout or when the hub is gone.
    pub fn next_timeout(&self, timeout: Duration) -> Option<Snapshot> {
        match self.receiver.recv_timeout(timeout) {
            Ok(snapshot) => Some(snapshot),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Apply every pending snapshot to `state`; returns how many were applied
    pub fn drain_into(&self, state: &mut LiveState) -> usize {
        let mut applied = 0;
        while let Some(snapshot) = self.try_next() {
            state.apply(snapshot);
            applied += 1;
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryTree;
    use crate::sync::Collection;
    use std::sync::Arc;

    #[test]
    fn test_publish_reaches_all_subscribers() {
        let hub = SnapshotHub::new();
        let a = hub.subscribe();
        let b = hub.subscribe();

        let delivered = hub.publish(Snapshot::Categories(Arc::new(CategoryTree::new())));
        assert_eq!(delivered, 2);
        assert_eq!(a.try_next().unwrap().collection(), Collection::Categories);
        assert_eq!(b.try_next().unwrap().collection(), Collection::Categories);
        assert!(a.try_next().is_none());
    }

    #[test]
    fn test_dropped_subscriptions_are_pruned() {
        let hub = SnapshotHub::new();
        let kept = hub.subscribe();
        drop(hub.subscribe());

        hub.publish(Snapshot::Records(Arc::new(Vec::new())));
        assert_eq!(hub.subscriber_count(), 1);
        assert!(kept.try_next().is_some());
    }

    #[test]
    fn test_drain_into_state() {
        let hub = SnapshotHub::new();
        let subscription = hub.subscribe();
        let mut state = LiveState::new();

        hub.publish(Snapshot::Transactions(Arc::new(Vec::new())));
        hub.publish(Snapshot::TempBudgets(Arc::default()));

        assert_eq!(subscription.drain_into(&mut state), 2);
        assert!(state.is_loaded(Collection::Transactions));
        assert!(state.is_loaded(Collection::TempBudgets));
        assert!(!state.is_complete());
        assert!(subscription.next_timeout(Duration::from_millis(5)).is_none());
    }
}
