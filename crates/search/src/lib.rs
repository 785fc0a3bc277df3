//! Semantic message search
//!
//! Two interchangeable strategies behind [`SearchStrategy`]:
//! 1. [`StoreDelegated`] calls the database `match_messages` function
//! 2. [`InProcessRanked`] fetches embedded messages and ranks them locally
//!
//! [`select_strategy`] probes the database once and picks between them.

mod delegated;
mod error;
mod in_process;
mod select;
mod strategy;
#[cfg(test)]
mod test_support;

pub use delegated::StoreDelegated;
pub use error::SearchError;
pub use in_process::InProcessRanked;
pub use select::select_strategy;
pub use strategy::{SearchStrategy, StrategyKind, StrategyOutcome};
