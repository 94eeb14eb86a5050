//! Entity store adapters for the tracker.

pub mod memory;
pub mod postgres;
