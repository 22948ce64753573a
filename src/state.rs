//! History-backed state cells.
//!
//! A [`HistoryState`] binds one typed value to a named slot in the active
//! navigation entry's [`StateBag`]. Writes mirror the value locally and
//! rewrite the bag (push or replace); back/forward navigation resynchronizes
//! the local mirror from the entry the navigation lands on.

use std::cell::RefCell;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::bag::StateBag;
use crate::error::{HistoryStateError, Result};
use crate::history::{History, SubscriptionId};

/// A typed state cell backed by a slot in the navigation history.
///
/// Binding establishes the initial value (stored slot wins over the seed),
/// subscribes to navigated notifications, and keeps a local mirror for
/// synchronous reads. Dropping the cell removes the subscription.
///
/// Cells are single-threaded by design; share the history across cells as
/// `Rc<dyn History>`.
pub struct HistoryState<T> {
    history: Rc<dyn History>,
    key: String,
    mirror: Rc<RefCell<T>>,
    subscription: SubscriptionId,
}

impl<T> HistoryState<T>
where
    T: Clone + PartialEq + Serialize + DeserializeOwned + 'static,
{
    /// Bind a cell seeded with a literal initial value.
    ///
    /// If the active entry's bag already holds `key`, the stored value wins
    /// and `initial` is discarded.
    pub fn bind(history: Rc<dyn History>, initial: T, key: impl Into<String>) -> Result<Self> {
        Self::bind_with(history, || initial, key)
    }

    /// Bind a cell seeded by a producer.
    ///
    /// The producer runs at most once, and not at all when the active
    /// entry's bag already holds `key`.
    ///
    /// # Errors
    ///
    /// [`HistoryStateError::EmptyKey`] if `key` is empty; no subscription is
    /// registered and the producer is not invoked.
    pub fn bind_with<F>(
        history: Rc<dyn History>,
        init: F,
        key: impl Into<String>,
    ) -> Result<Self>
    where
        F: FnOnce() -> T,
    {
        let key = key.into();
        if key.is_empty() {
            return Err(HistoryStateError::EmptyKey);
        }

        let value = match Self::decode_slot(&history.state(), &key) {
            Some(stored) => stored,
            None => init(),
        };
        let mirror = Rc::new(RefCell::new(value));

        let listener_mirror = mirror.clone();
        let listener_key = key.clone();
        let subscription = history.subscribe(Rc::new(move |bag: &StateBag| {
            // Entries without this slot leave the mirror alone.
            let Some(candidate) = Self::decode_slot(bag, &listener_key) else {
                return;
            };
            let mut mirror = listener_mirror.borrow_mut();
            if candidate != *mirror {
                *mirror = candidate;
            }
        }));

        Ok(Self {
            history,
            key,
            mirror,
            subscription,
        })
    }

    /// The slot key this cell is bound to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The current mirror value.
    pub fn get(&self) -> T {
        self.mirror.borrow().clone()
    }

    /// Set the value, pushing a new history entry.
    pub fn set(&self, value: T) -> Result<()> {
        self.write(value, false)
    }

    /// Set the value, replacing the current history entry's bag.
    pub fn set_replacing(&self, value: T) -> Result<()> {
        self.write(value, true)
    }

    /// Compute the next value from the previous one, pushing a new entry.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> Result<()> {
        let next = f(&self.mirror.borrow());
        self.write(next, false)
    }

    /// Compute the next value from the previous one, replacing the current
    /// entry's bag.
    pub fn update_replacing(&self, f: impl FnOnce(&T) -> T) -> Result<()> {
        let next = f(&self.mirror.borrow());
        self.write(next, true)
    }

    /// Encode, mirror, then rewrite the live bag with one slot overwritten.
    ///
    /// Encoding happens first so an encode failure leaves the mirror and the
    /// history untouched.
    fn write(&self, value: T, replace: bool) -> Result<()> {
        let encoded =
            serde_json::to_value(&value).map_err(|source| HistoryStateError::Encode {
                key: self.key.clone(),
                source,
            })?;
        *self.mirror.borrow_mut() = value;

        debug!(key = %self.key, value = %encoded, replace, "slot written");
        let bag = self.history.state().with(&self.key, encoded);
        if replace {
            self.history.replace(bag);
        } else {
            self.history.push(bag);
        }
        Ok(())
    }

    /// Read `key` out of `bag` as a `T`.
    ///
    /// A stored value that fails to decode counts as "slot not present".
    fn decode_slot(bag: &StateBag, key: &str) -> Option<T> {
        let raw = bag.get(key)?;
        match serde_json::from_value(raw.clone()) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key = %key, %err, "stored slot does not decode, treating as absent");
                None
            }
        }
    }
}

impl<T> Drop for HistoryState<T> {
    fn drop(&mut self) {
        self.history.unsubscribe(self.subscription);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryHistory;
    use serde_json::json;
    use std::cell::Cell;

    fn history() -> Rc<MemoryHistory> {
        Rc::new(MemoryHistory::new())
    }

    #[test]
    fn literal_initial_is_returned_unchanged() {
        let history = history();
        let cell = HistoryState::bind(history, 42i64, "count").unwrap();
        assert_eq!(cell.get(), 42);
        assert_eq!(cell.key(), "count");
    }

    #[test]
    fn empty_key_fails_without_subscribing() {
        let history = history();
        let result = HistoryState::bind(history.clone(), 0i64, "");
        assert!(matches!(result, Err(HistoryStateError::EmptyKey)));
        assert_eq!(history.subscriber_count(), 0);
    }

    #[test]
    fn producer_runs_once_when_slot_absent() {
        let history = history();
        let calls = Rc::new(Cell::new(0));
        let calls_in_init = calls.clone();
        let cell = HistoryState::bind_with(
            history,
            move || {
                calls_in_init.set(calls_in_init.get() + 1);
                7i64
            },
            "count",
        )
        .unwrap();

        assert_eq!(cell.get(), 7);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn producer_never_runs_when_slot_present() {
        let history = history();
        history.replace(StateBag::new().with("count", json!(99)));

        let calls = Rc::new(Cell::new(0));
        let calls_in_init = calls.clone();
        let cell = HistoryState::bind_with(
            history,
            move || {
                calls_in_init.set(calls_in_init.get() + 1);
                7i64
            },
            "count",
        )
        .unwrap();

        assert_eq!(cell.get(), 99);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn stored_slot_wins_over_literal_initial() {
        let history = history();
        history.replace(StateBag::new().with("tab", json!("settings")));

        let cell = HistoryState::bind(history, "home".to_string(), "tab").unwrap();
        assert_eq!(cell.get(), "settings");
    }

    #[test]
    fn undecodable_slot_counts_as_absent() {
        let history = history();
        history.replace(StateBag::new().with("count", json!("not a number")));

        let cell = HistoryState::bind(history, 5i64, "count").unwrap();
        assert_eq!(cell.get(), 5);
    }

    #[test]
    fn set_pushes_a_new_entry() {
        let history = history();
        let cell = HistoryState::bind(history.clone(), 0i64, "count").unwrap();

        cell.set(3).unwrap();

        assert_eq!(cell.get(), 3);
        assert_eq!(history.len(), 2);
        assert_eq!(history.state().get("count"), Some(&json!(3)));
    }

    #[test]
    fn set_replacing_keeps_entry_count() {
        let history = history();
        let cell = HistoryState::bind(history.clone(), 0i64, "count").unwrap();

        cell.set_replacing(3).unwrap();

        assert_eq!(cell.get(), 3);
        assert_eq!(history.len(), 1);
        assert_eq!(history.state().get("count"), Some(&json!(3)));
    }

    #[test]
    fn update_sees_previous_mirror_value() {
        let history = history();
        let cell = HistoryState::bind(history.clone(), 5i64, "count").unwrap();

        cell.update(|prev| prev + 1).unwrap();

        assert_eq!(cell.get(), 6);
        assert_eq!(history.state().get("count"), Some(&json!(6)));
    }

    #[test]
    fn update_replacing_keeps_entry_count() {
        let history = history();
        let cell = HistoryState::bind(history.clone(), 5i64, "count").unwrap();

        cell.update_replacing(|prev| prev * 2).unwrap();

        assert_eq!(cell.get(), 10);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn back_resynchronizes_the_mirror() {
        let history = history();
        let cell = HistoryState::bind(history.clone(), 10i64, "count").unwrap();
        cell.set_replacing(10).unwrap();
        cell.set(20).unwrap();

        history.back();

        assert_eq!(cell.get(), 10);
    }

    #[test]
    fn navigation_without_slot_leaves_mirror_alone() {
        let history = history();
        // The root entry's bag never held "count".
        let cell = HistoryState::bind(history.clone(), 0i64, "count").unwrap();
        cell.set(8).unwrap();

        history.back();

        assert_eq!(cell.get(), 8);
    }

    #[test]
    fn drop_removes_the_subscription() {
        let history = history();
        let cell = HistoryState::bind(history.clone(), 0i64, "count").unwrap();
        cell.set(1).unwrap();
        assert_eq!(history.subscriber_count(), 1);

        drop(cell);

        assert_eq!(history.subscriber_count(), 0);
        // Navigation after teardown must not panic.
        history.back();
    }

    #[test]
    fn writes_preserve_other_cells_slots() {
        let history = history();
        let count = HistoryState::bind(history.clone(), 0i64, "count").unwrap();
        let tab = HistoryState::bind(history.clone(), "home".to_string(), "tab").unwrap();

        count.set_replacing(4).unwrap();
        tab.set_replacing("settings".to_string()).unwrap();

        let bag = history.state();
        assert_eq!(bag.get("count"), Some(&json!(4)));
        assert_eq!(bag.get("tab"), Some(&json!("settings")));
    }
}
