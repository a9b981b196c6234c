//! In-memory provider used by unit and router tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::provider::{ProviderError, PushProvider};
use crate::models::OutboundMessage;

/// Records every message it is asked to send
pub struct RecordingProvider {
    outcome: Result<String, String>,
    sent: Mutex<Vec<OutboundMessage>>,
    delay: Option<Duration>,
}

impl RecordingProvider {
    pub fn succeeding(receipt: &str) -> Self {
        Self {
            outcome: Ok(receipt.to_string()),
            sent: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            sent: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    /// Waits `delay` before answering each send
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn messages(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl PushProvider for RecordingProvider {
    async fn send(&self, message: &OutboundMessage) -> Result<String, ProviderError> {
        self.sent.lock().unwrap().push(message.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.outcome {
            Ok(receipt) => Ok(receipt.clone()),
            Err(message) => Err(ProviderError::Rejected {
                status: 429,
                message: message.clone(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        "recording"
    }

    async fn validate_config(&self) -> Result<(), ProviderError> {
        match &self.outcome {
            Ok(_) => Ok(()),
            Err(message) => Err(ProviderError::Configuration {
                message: message.clone(),
            }),
        }
    }
}
