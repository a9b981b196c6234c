//! Middleware components for request processing.
//!
//! Request IDs, request logging, CORS and JSON error shaping.

mod cors;
mod error_handler;
mod logging;
mod request_id;

pub use cors::{build_cors_layer, preflight_no_content};
pub use error_handler::{error_to_code, error_to_status_code, json_error_fallback};
pub use logging::logging_middleware;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
