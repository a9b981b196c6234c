//! Outbound HTTP plumbing shared by external integrations.

pub mod client;

pub use client::build_http_client;
