//! Navigation-history host capability.
//!
//! The navigation stack is global mutable state owned by the host
//! environment, so it enters this crate through the [`History`] trait rather
//! than as a direct dependency. [`MemoryHistory`] is the bundled
//! implementation: a complete in-memory stack suitable both for driving a UI
//! loop and for substituting the host in tests.

mod memory;
mod subscription;

pub use memory::MemoryHistory;
pub use subscription::SubscriptionId;

use std::rc::Rc;

use crate::bag::StateBag;

/// A navigation listener, invoked with the newly active entry's bag.
pub type NavigationListener = Rc<dyn Fn(&StateBag)>;

/// The host navigation-history capability.
///
/// Implementations are single-threaded and synchronous; methods take `&self`
/// and use interior mutability so the history can be shared across cells as
/// `Rc<dyn History>`.
pub trait History {
    /// Snapshot of the active entry's state bag.
    fn state(&self) -> StateBag;

    /// Add a new entry carrying `bag` and make it active.
    fn push(&self, bag: StateBag);

    /// Overwrite the active entry's bag without adding an entry.
    fn replace(&self, bag: StateBag);

    /// Register a listener for navigated notifications.
    ///
    /// Notifications fire when the active position changes by traversal
    /// (back/forward), not on [`push`](History::push) or
    /// [`replace`](History::replace).
    fn subscribe(&self, listener: NavigationListener) -> SubscriptionId;

    /// Remove a previously registered listener. Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}
