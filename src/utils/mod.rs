//! Request extraction helpers.

mod json;

pub use json::JsonBody;
