//! Command handlers for CLI operations
//!
//! Handlers keep command execution separate from parsing and validation.

pub mod send;
pub mod serve;

pub use send::SendCommandHandler;
pub use serve::ServeCommandHandler;
