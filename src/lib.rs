//! Taskboard: project, epic, story and sprint tracking.
//!
//! The crate provides a task-tracking backend exposed both as a REST API and
//! as a set of named tools for language-model agents. Both interfaces share
//! one service facade, so workflow and sprint rules hold regardless of how a
//! request arrives.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: entities, value types and the story workflow rule
//! - **Ports**: the transactional entity store contract
//! - **Adapters**: in-memory and `PostgreSQL` stores
//! - **Transports**: REST and tool-call adapters over the service facade
//!
//! # Modules
//!
//! - [`tracker`]: domain, store, and the [`tracker::services::TrackerService`] facade
//! - [`transport`]: REST router and tool registry
//! - [`config`]: command-line and environment configuration
//! - [`telemetry`]: tracing subscriber setup

pub mod config;
pub mod telemetry;
pub mod tracker;
pub mod transport;
