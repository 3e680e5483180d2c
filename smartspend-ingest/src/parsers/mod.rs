//! Balance-anchored statement parsing: span matcher and ledger reconciler.

pub mod matcher;
pub mod reconciler;

pub use matcher::TransactionMatcher;
pub use reconciler::{Reconciled, Reconciler};
