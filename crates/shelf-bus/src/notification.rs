//! Change hub: fan-out of change notifications to locator subscriptions

use parking_lot::RwLock;
use shelf_core::Locator;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{
    self, Receiver, RecvTimeoutError, Sender, SyncSender, TryRecvError, TrySendError,
};
use std::sync::{Arc, Weak};
use std::time::Duration;

use crate::error::{BusError, Result};
use crate::filter::LocatorFilter;

/// A change published on a locator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    /// Hub-wide publish sequence, starting at 1
    pub sequence: u64,
    pub locator: Locator,
}

/// Delivery side of a subscription
enum Queue {
    /// Every change is kept until read
    Unbounded(Sender<Change>),
    /// At most one pending change; later ones fold into it
    Coalesced(SyncSender<Change>),
}

impl Queue {
    /// `false` once the receiver is gone
    fn deliver(&self, change: &Change) -> bool {
        match self {
            Queue::Unbounded(tx) => tx.send(change.clone()).is_ok(),
            Queue::Coalesced(tx) => match tx.try_send(change.clone()) {
                Ok(()) | Err(TrySendError::Full(_)) => true,
                Err(TrySendError::Disconnected(_)) => false,
            },
        }
    }
}

struct Subscriber {
    id: u64,
    filter: LocatorFilter,
    queue: Queue,
}

#[derive(Default)]
struct HubState {
    subscribers: RwLock<Vec<Subscriber>>,
    next_id: AtomicU64,
    sequence: AtomicU64,
}

/// Publish/subscribe hub keyed by locator
///
/// Cloning yields another handle to the same hub.
#[derive(Clone, Default)]
pub struct ChangeHub {
    state: Arc<HubState>,
}

impl ChangeHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscription
    ///
    /// Changes published after this call and matching `filter` are queued on
    /// the returned subscription until read.
    pub fn subscribe(&self, filter: LocatorFilter) -> Subscription {
        let (tx, rx) = mpsc::channel();
        self.register(filter, Queue::Unbounded(tx), rx)
    }

    /// Register a subscription that holds at most one pending change
    ///
    /// Changes published while one is already queued are dropped, so the
    /// subscription only answers "changed since the last read". The queued
    /// change is the oldest unread one.
    pub fn subscribe_coalesced(&self, filter: LocatorFilter) -> Subscription {
        let (tx, rx) = mpsc::sync_channel(1);
        self.register(filter, Queue::Coalesced(tx), rx)
    }

    /// Subscribe to one locator, optionally including everything beneath it
    pub fn watch(&self, locator: Locator, descendants: bool) -> Subscription {
        self.subscribe(LocatorFilter::watch(locator, descendants))
    }

    /// Coalesced form of [`watch`](Self::watch)
    pub fn watch_coalesced(&self, locator: Locator, descendants: bool) -> Subscription {
        self.subscribe_coalesced(LocatorFilter::watch(locator, descendants))
    }

    fn register(&self, filter: LocatorFilter, queue: Queue, rx: Receiver<Change>) -> Subscription {
        let id = self.state.next_id.fetch_add(1, Ordering::Relaxed);

        tracing::trace!(subscription = id, ?filter, "subscribe");
        self.state
            .subscribers
            .write()
            .push(Subscriber { id, filter, queue });

        Subscription {
            id,
            rx,
            hub: Arc::downgrade(&self.state),
        }
    }

    /// Deliver a change to every matching subscription
    ///
    /// Returns once the change is queued on each of them, with the number of
    /// subscriptions reached. Subscriptions whose receiver is gone are dropped.
    pub fn publish(&self, locator: &Locator) -> usize {
        let sequence = self.state.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let change = Change {
            sequence,
            locator: locator.clone(),
        };

        let mut delivered = 0;
        let mut subs = self.state.subscribers.write();
        subs.retain(|sub| {
            if !sub.filter.matches(locator) {
                return true;
            }
            let live = sub.queue.deliver(&change);
            if live {
                delivered += 1;
            }
            live
        });

        shelf_core::observe::record_notification();
        tracing::debug!(%locator, sequence, delivered, "change published");
        delivered
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.state.subscribers.read().len()
    }
}

/// Receiving end of a hub subscription
///
/// Dropping the subscription unregisters it.
pub struct Subscription {
    id: u64,
    rx: Receiver<Change>,
    hub: Weak<HubState>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Block until the next change is available.
    pub fn recv(&self) -> Result<Change> {
        self.rx.recv().map_err(|_| BusError::Closed)
    }

    /// Try to receive a change without blocking.
    pub fn try_recv(&self) -> Result<Option<Change>> {
        match self.rx.try_recv() {
            Ok(change) => Ok(Some(change)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(BusError::Closed),
        }
    }

    /// Block for up to `timeout` waiting for a change.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Change> {
        self.rx.recv_timeout(timeout).map_err(|e| match e {
            RecvTimeoutError::Timeout => BusError::Timeout,
            RecvTimeoutError::Disconnected => BusError::Closed,
        })
    }

    /// Take every queued change without blocking
    pub fn drain(&self) -> Vec<Change> {
        self.rx.try_iter().collect()
    }

    /// Unregister now
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(state) = self.hub.upgrade() {
            state.subscribers.write().retain(|sub| sub.id != self.id);
            tracing::trace!(subscription = self.id, "unsubscribe");
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
