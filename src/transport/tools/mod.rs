//! Tool-call adapter for language-model agents.
//!
//! [`ToolRegistry`] maps named calls with JSON arguments onto the tracker
//! service; [`serve_lines`] drives it over a line-delimited JSON stream such
//! as stdin and stdout.

mod definition;
mod error;
mod registry;
mod stdio;

pub use definition::{ToolDefinition, catalogue};
pub use error::{ToolError, ToolErrorKind};
pub use registry::ToolRegistry;
pub use stdio::serve_lines;
