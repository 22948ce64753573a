//! Subscription identifiers for navigation listeners.

use std::fmt;

/// Identifies one navigation-listener registration.
///
/// Returned by [`History::subscribe`](super::History::subscribe) and passed
/// back to [`History::unsubscribe`](super::History::unsubscribe). Ids are
/// unique per history instance and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub_{}", self.0)
    }
}
