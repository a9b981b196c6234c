//! Data Transfer Objects for API responses.
//!
//! Request bodies live in `crate::models`; the dispatcher consumes them
//! directly.

mod error;
mod health;
mod notification;

pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use notification::DispatchResponse;
