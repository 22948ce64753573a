//! Per-entry state bags.
//!
//! Every navigation entry carries one [`StateBag`]: an opaque mapping from
//! string keys to JSON values. Bags are replaced wholesale on each write, so
//! a bag value is always a consistent snapshot of one entry's state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The key/value state attached to one navigation entry.
///
/// Values are opaque to the bag; cells encode and decode them at the edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateBag {
    slots: BTreeMap<String, Value>,
}

impl StateBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.slots.get(key)
    }

    /// Check whether `key` has a slot in this bag.
    pub fn contains(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    /// Return a copy of this bag with `key` overwritten to `value`.
    ///
    /// This is the write primitive: the whole bag is carried over and exactly
    /// one slot is replaced, so unrelated slots written by other cells
    /// survive.
    pub fn with(&self, key: &str, value: Value) -> Self {
        let mut slots = self.slots.clone();
        slots.insert(key.to_string(), value);
        Self { slots }
    }

    /// Number of slots in the bag.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the bag has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_bag_is_empty() {
        let bag = StateBag::new();
        assert!(bag.is_empty());
        assert_eq!(bag.len(), 0);
        assert!(!bag.contains("anything"));
    }

    #[test]
    fn with_overwrites_one_slot() {
        let bag = StateBag::new().with("count", json!(1)).with("tab", json!("a"));
        let next = bag.with("count", json!(2));

        assert_eq!(next.get("count"), Some(&json!(2)));
        assert_eq!(next.get("tab"), Some(&json!("a")));
        // Original is untouched.
        assert_eq!(bag.get("count"), Some(&json!(1)));
    }

    #[test]
    fn get_missing_key_is_none() {
        let bag = StateBag::new().with("count", json!(1));
        assert!(bag.get("other").is_none());
        assert!(!bag.contains("other"));
    }

    #[test]
    fn bag_serializes_transparently() {
        let bag = StateBag::new().with("count", json!(5));
        let json = serde_json::to_string(&bag).unwrap();
        assert_eq!(json, r#"{"count":5}"#);

        let back: StateBag = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bag);
    }
}
