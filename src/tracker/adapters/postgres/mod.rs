//! `PostgreSQL` adapter for the tracker store.

mod models;
mod schema;
mod store;

pub use store::{PostgresTrackerStore, SCHEMA_SQL, TrackerPgPool};
