//! Change notification hub.
//!
//! # Responsibility
//! - Keep an ordered set of observers and broadcast "state changed" to them.
//!
//! # Invariants
//! - Observers are called synchronously in subscription order.
//! - Observers receive a shared borrow of the subject, so they can re-read
//!   state but cannot mutate it while a notification is in flight.
//! - A panicking observer is not caught; it unwinds through `notify`.

use log::trace;
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Single-method change handler.
pub trait Observer<T: ?Sized> {
    fn update(&self, subject: &T);
}

impl<T: ?Sized, F> Observer<T> for F
where
    F: Fn(&T),
{
    fn update(&self, subject: &T) {
        self(subject)
    }
}

/// Ordered observer registry.
pub struct Subject<T: ?Sized> {
    observers: BTreeMap<SubscriptionId, Box<dyn Observer<T>>>,
    next_id: u64,
}

impl<T: ?Sized> Default for Subject<T> {
    fn default() -> Self {
        Self {
            observers: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T: ?Sized> Debug for Subject<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subject")
            .field("observers", &self.observers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl<T: ?Sized> Subject<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer without invoking it.
    ///
    /// Ids grow monotonically, so map order equals subscription order.
    pub fn subscribe(&mut self, observer: Box<dyn Observer<T>>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.insert(id, observer);
        id
    }

    /// Removes one registration. Returns `false` for unknown ids.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.remove(&id).is_some()
    }

    /// Calls `update` on every observer in subscription order.
    pub fn notify(&self, subject: &T) {
        trace!("event=notify module=notify observers={}", self.observers.len());
        for observer in self.observers.values() {
            observer.update(subject);
        }
    }

    /// Invokes only the observer registered under `id`.
    pub(crate) fn notify_one(&self, id: SubscriptionId, subject: &T) {
        if let Some(observer) = self.observers.get(&id) {
            observer.update(subject);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}
