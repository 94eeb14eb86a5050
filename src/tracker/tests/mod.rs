//! Unit tests for the tracker module.

mod domain_tests;
mod error_tests;
mod project_service_tests;
mod sprint_service_tests;
mod workflow_tests;
