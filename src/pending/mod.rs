//! Deferred gated actions.
//!
//! When an unauthenticated user attempts a gated action, the action is
//! recorded here and replayed after login. Single slot, last write wins.

mod action;
mod config;
mod ledger;

pub use action::{PendingAction, ProductId, StoredAction};
pub use config::LedgerConfig;
pub use ledger::PendingActionLedger;
