//! Notification dispatch: validate, build, send once, shape the receipt.

use std::sync::Arc;

use super::provider::PushProvider;
use crate::error::{AppError, AppResult};
use crate::models::{NotificationRequest, Target};

/// Outcome of a successful dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReceipt {
    /// Provider receipt, e.g. `projects/p/messages/123`
    pub response: String,
    pub target: Target,
    pub shop_name: Option<String>,
    pub product_name: Option<String>,
}

/// Relays notification requests to the configured push provider.
///
/// Cloning is cheap; the provider is shared behind an `Arc`.
#[derive(Clone)]
pub struct NotificationDispatcher {
    provider: Arc<dyn PushProvider>,
}

impl NotificationDispatcher {
    pub fn new(provider: Arc<dyn PushProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<dyn PushProvider> {
        &self.provider
    }

    /// Validates `request`, derives the outbound message and sends it.
    ///
    /// The provider is called exactly once for a valid request and never for
    /// an invalid one. There is no retry.
    pub async fn dispatch(&self, request: NotificationRequest) -> AppResult<DispatchReceipt> {
        let kind = request.kind();
        let prepared = request.prepare().inspect_err(|e| {
            tracing::debug!(kind, error = %e, "Notification request rejected");
        })?;

        let target = prepared.message.target.clone();
        tracing::info!(
            kind,
            provider = self.provider.name(),
            target_kind = target.kind(),
            target = %target.log_value(),
            "Dispatching notification"
        );

        let response = self
            .provider
            .send(&prepared.message)
            .await
            .map_err(|source| {
                tracing::warn!(
                    provider = self.provider.name(),
                    target_kind = target.kind(),
                    error = %source,
                    "Push provider send failed"
                );
                AppError::Provider {
                    provider: self.provider.name().to_string(),
                    source,
                }
            })?;

        tracing::info!(
            target_kind = target.kind(),
            receipt = %response,
            "Notification sent"
        );

        Ok(DispatchReceipt {
            response,
            target,
            shop_name: prepared.shop_name,
            product_name: prepared.product_name,
        })
    }
}
