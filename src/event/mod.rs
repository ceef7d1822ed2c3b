//! Single-shot event channel.
//!
//! Subscribers are notified at most once: `dispatch` swaps the subscriber
//! list for an empty one before calling anything, so a listener that wants
//! the next notification has to subscribe again.

use std::fmt;

/// Identifies one subscription on an [`EventChannel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Callback = Box<dyn FnMut(i32)>;

/// Callback registry that clears itself on every dispatch.
#[derive(Default)]
pub struct EventChannel {
    subscribers: Vec<(SubscriberId, Callback)>,
    next_id: u64,
}

impl fmt::Debug for EventChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl EventChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for the next dispatch only.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriberId
    where
        F: FnMut(i32) + 'static,
    {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Drop a subscription before it fires. Returns false if it was not pending.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Notify and clear all subscribers. Returns how many were notified.
    ///
    /// The channel is already empty while callbacks run.
    pub fn dispatch(&mut self, arg: i32) -> usize {
        let pending = std::mem::take(&mut self.subscribers);
        let count = pending.len();
        for (_, mut callback) in pending {
            callback(arg);
        }
        count
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}
