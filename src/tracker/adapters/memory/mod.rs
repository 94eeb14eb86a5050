//! In-memory entity store.
//!
//! Suitable for tests and for running the service without a database.

mod store;

pub use store::InMemoryTrackerStore;
