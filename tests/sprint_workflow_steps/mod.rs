//! Step definitions for sprint workflow scenarios.

mod given;
mod then;
mod when;
pub mod world;
