//! Application state for Axum web framework.

use std::sync::Arc;

use crate::services::{PushProvider, Services};

/// Shared state handed to every handler.
///
/// Cloning is cheap; the push provider sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
}

impl AppState {
    /// Creates the state around an already constructed provider.
    pub fn new(provider: Arc<dyn PushProvider>) -> Self {
        Self {
            services: Services::new(provider),
        }
    }
}
