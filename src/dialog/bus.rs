//! Broadcast channels connecting dialog triggers to the dialog host.
//!
//! Each [`Channel`] carries one event type and delivers every publish
//! synchronously to the subscribers registered at publish time, in the order
//! they subscribed. There is no buffering or replay: publishing on a channel
//! without subscribers drops the event.

use std::fmt;
use std::sync::{Arc, Mutex, Weak};

use super::lock_unpoisoned;
use super::session::DialogRequest;

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Registry<T> {
    next_id: u64,
    subscribers: Vec<(u64, Callback<T>)>,
}

impl<T> Registry<T> {
    fn contains(&self, id: u64) -> bool {
        self.subscribers.iter().any(|(sub_id, _)| *sub_id == id)
    }
}

/// A multi-subscriber broadcast channel.
pub struct Channel<T> {
    name: &'static str,
    registry: Arc<Mutex<Registry<T>>>,
}

impl<T> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<T: 'static> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.name)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl<T: 'static> Channel<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            registry: Arc::new(Mutex::new(Registry {
                next_id: 1,
                subscribers: Vec::new(),
            })),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Register a callback. The returned [`Subscription`] unsubscribes when dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = {
            let mut registry = lock_unpoisoned(&self.registry);
            let id = registry.next_id;
            registry.next_id += 1;
            registry.subscribers.push((id, Arc::new(callback)));
            id
        };

        let weak: Weak<Mutex<Registry<T>>> = Arc::downgrade(&self.registry);
        let name = self.name;
        Subscription {
            channel: name,
            release: Some(Box::new(move || {
                if let Some(registry) = weak.upgrade() {
                    lock_unpoisoned(&registry).subscribers.retain(|(sub_id, _)| *sub_id != id);
                    log::trace!("bus: subscriber {} left '{}'", id, name);
                }
            })),
        }
    }

    /// Deliver `event` to every current subscriber and return how many received it.
    ///
    /// The registry lock is not held while callbacks run, so a callback may
    /// publish, subscribe or drop subscriptions. A subscriber disposed part-way
    /// through a publish is not invoked afterwards.
    pub fn publish(&self, event: &T) -> usize {
        let snapshot: Vec<(u64, Callback<T>)> = lock_unpoisoned(&self.registry)
            .subscribers
            .iter()
            .map(|(id, callback)| (*id, Arc::clone(callback)))
            .collect();

        if snapshot.is_empty() {
            log::trace!("bus: '{}' has no subscribers, event dropped", self.name);
            return 0;
        }

        let mut delivered = 0;
        for (id, callback) in snapshot {
            if !lock_unpoisoned(&self.registry).contains(id) {
                continue;
            }
            callback(event);
            delivered += 1;
        }
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        lock_unpoisoned(&self.registry).subscribers.len()
    }
}

/// Disposer for a channel subscription.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    channel: &'static str,
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Name of the channel this subscription belongs to.
    pub fn channel(&self) -> &'static str {
        self.channel
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    /// Unsubscribe now. Equivalent to dropping the subscription.
    pub fn dispose(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("channel", &self.channel)
            .field("active", &self.is_active())
            .finish()
    }
}

/// The five channels of the confirmation-dialog protocol.
///
/// Cloning the bus yields another handle to the same channels; the bus is
/// created once at startup and injected into the host and every coordinator.
#[derive(Clone, Debug)]
pub struct DialogBus {
    /// A trigger requests the dialog with new content.
    pub open: Channel<DialogRequest>,
    /// The user pressed confirm.
    pub confirm: Channel<()>,
    /// The dialog should hide (cancel, dismissal, or end of a flow).
    pub close: Channel<()>,
    /// Session data may be discarded immediately.
    pub reset: Channel<()>,
    /// The host's visibility changed.
    pub is_open: Channel<bool>,
}

impl DialogBus {
    pub fn new() -> Self {
        Self {
            open: Channel::new("open"),
            confirm: Channel::new("confirm"),
            close: Channel::new("close"),
            reset: Channel::new("reset"),
            is_open: Channel::new("is_open"),
        }
    }
}

impl Default for DialogBus {
    fn default() -> Self {
        Self::new()
    }
}
