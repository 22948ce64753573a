//! history-state - History-backed component state.
//!
//! This crate provides a single reusable UI-state primitive: a state cell
//! that synchronizes a component-local value with the active entry of a
//! navigation-history stack, so back/forward navigation restores prior
//! values and writes can either push a new entry or replace the current one.
//!
//! # Modules
//!
//! - [`bag`] - Per-entry key/value state bags
//! - [`error`] - Error types and result aliases
//! - [`history`] - The host navigation capability and the in-memory stack
//! - [`state`] - The [`HistoryState`] cell itself
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use history_state::{HistoryState, MemoryHistory};
//!
//! let history = Rc::new(MemoryHistory::new());
//! let count = HistoryState::bind(history.clone(), 0i64, "count").unwrap();
//!
//! count.set(1).unwrap();
//! count.update(|prev| prev + 1).unwrap();
//! assert_eq!(count.get(), 2);
//!
//! // Back navigation restores the previous value.
//! history.back();
//! assert_eq!(count.get(), 1);
//! ```

pub mod bag;
pub mod error;
pub mod history;
pub mod state;

pub use bag::StateBag;
pub use error::{HistoryStateError, Result};
pub use history::{History, MemoryHistory, NavigationListener, SubscriptionId};
pub use state::HistoryState;
