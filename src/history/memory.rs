//! In-memory navigation history.

use std::cell::RefCell;

use tracing::debug;

use super::{History, NavigationListener, SubscriptionId};
use crate::bag::StateBag;

/// An in-memory navigation stack.
///
/// Starts with a single entry carrying an empty [`StateBag`]. Pushing while
/// positioned before the end discards the forward entries, and traversing
/// past either end is a silent no-op, matching browser history behavior.
pub struct MemoryHistory {
    inner: RefCell<Inner>,
}

struct Inner {
    entries: Vec<StateBag>,
    position: usize,
    listeners: Vec<(SubscriptionId, NavigationListener)>,
    next_subscription: u64,
}

impl MemoryHistory {
    /// Create a history with one empty entry at position 0.
    pub fn new() -> Self {
        Self {
            inner: RefCell::new(Inner {
                entries: vec![StateBag::new()],
                position: 0,
                listeners: Vec::new(),
                next_subscription: 0,
            }),
        }
    }

    /// Move back one entry, notifying listeners. No-op at the oldest entry.
    pub fn back(&self) {
        self.go(-1);
    }

    /// Move forward one entry, notifying listeners. No-op at the newest
    /// entry.
    pub fn forward(&self) {
        self.go(1);
    }

    /// Move `delta` entries through the stack and notify listeners.
    ///
    /// A `delta` that would land outside the stack leaves the position
    /// unchanged and fires no notification.
    pub fn go(&self, delta: isize) {
        let landed = {
            let mut inner = self.inner.borrow_mut();
            let target = inner.position as isize + delta;
            if delta == 0 || target < 0 || target as usize >= inner.entries.len() {
                return;
            }
            inner.position = target as usize;
            inner.position
        };
        debug!(position = landed, "navigated");
        self.notify();
    }

    /// Number of entries in the stack.
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Whether the stack is empty. Always false for a fresh history.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    /// Index of the active entry.
    pub fn position(&self) -> usize {
        self.inner.borrow().position
    }

    /// Number of registered navigation listeners (diagnostics).
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Invoke every listener with the now-active bag.
    ///
    /// The internal borrow is released before any listener runs, so
    /// listeners may read [`History::state`] reentrantly.
    fn notify(&self) {
        let (bag, listeners) = {
            let inner = self.inner.borrow();
            let bag = inner.entries[inner.position].clone();
            let listeners: Vec<NavigationListener> =
                inner.listeners.iter().map(|(_, l)| l.clone()).collect();
            (bag, listeners)
        };
        for listener in listeners {
            listener(&bag);
        }
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl History for MemoryHistory {
    fn state(&self) -> StateBag {
        let inner = self.inner.borrow();
        inner.entries[inner.position].clone()
    }

    fn push(&self, bag: StateBag) {
        let mut inner = self.inner.borrow_mut();
        let cut = inner.position + 1;
        inner.entries.truncate(cut);
        inner.entries.push(bag);
        inner.position += 1;
    }

    fn replace(&self, bag: StateBag) {
        let mut inner = self.inner.borrow_mut();
        let position = inner.position;
        inner.entries[position] = bag;
    }

    fn subscribe(&self, listener: NavigationListener) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId::new(inner.next_subscription);
        inner.next_subscription += 1;
        inner.listeners.push((id, listener));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        let mut inner = self.inner.borrow_mut();
        inner.listeners.retain(|(sub, _)| *sub != id);
    }
}
