//! Port contracts for the tracker.
//!
//! Ports define infrastructure-agnostic interfaces used by tracker services.

pub mod store;

#[cfg(test)]
pub use store::MockTrackerTransaction;
pub use store::{TrackerStore, TrackerStoreError, TrackerStoreResult, TrackerTransaction};
