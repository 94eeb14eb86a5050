//! Project, epic, story and sprint tracking for Taskboard.
//!
//! The tracker owns the workflow and consistency rules of the system: story
//! status transitions, sprint membership exclusivity, and sprint closure.
//! Everything else is plain record keeping around those rules. The module
//! follows hexagonal architecture:
//!
//! - Domain types and the workflow validator in [`domain`]
//! - The transactional entity store contract in [`ports`]
//! - In-memory and `PostgreSQL` stores in [`adapters`]
//! - The service facade and membership guard in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
