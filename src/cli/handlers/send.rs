//! Send command handler
//!
//! Dispatches one generic notification through the same dispatcher the HTTP
//! endpoint uses.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::api::dto::DispatchResponse;
use crate::cli::parser::SendArgs;
use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::models::GenericNotificationRequest;
use crate::services::{NotificationDispatcher, PushProvider, build_provider};

/// Handler for the send command
pub struct SendCommandHandler {
    config: Settings,
}

impl SendCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Build the FCM provider from configuration and send
    pub async fn execute(&self, args: &SendArgs) -> AppResult<DispatchResponse> {
        let provider = build_provider(&self.config.firebase)?;
        send_with(provider, args).await
    }
}

/// Send `args` through `provider`
pub async fn send_with(
    provider: Arc<dyn PushProvider>,
    args: &SendArgs,
) -> AppResult<DispatchResponse> {
    let dispatcher = NotificationDispatcher::new(provider);
    let receipt = dispatcher.dispatch(to_request(args).into()).await?;
    Ok(receipt.into())
}

fn to_request(args: &SendArgs) -> GenericNotificationRequest {
    let data: HashMap<String, Value> = args
        .data
        .iter()
        .map(|(key, value)| (key.clone(), Value::String(value.clone())))
        .collect();

    GenericNotificationRequest {
        topic: args.topic.clone(),
        token: args.token.clone(),
        title: Some(args.title.clone()),
        body: Some(args.body.clone()),
        image: args.image.clone(),
        data: (!data.is_empty()).then_some(data),
    }
}
