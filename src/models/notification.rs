//! Outbound push message model.
//!
//! `OutboundMessage` serializes to the `message` object of the FCM HTTP v1
//! send request.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Addressing mode of a message: exactly one of topic or device token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Topic(String),
    Token(String),
}

impl Target {
    pub fn kind(&self) -> &'static str {
        match self {
            Target::Topic(_) => "topic",
            Target::Token(_) => "token",
        }
    }

    pub fn topic(&self) -> Option<&str> {
        match self {
            Target::Topic(topic) => Some(topic),
            Target::Token(_) => None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Target::Token(token) => Some(token),
            Target::Topic(_) => None,
        }
    }

    /// Value safe to write to logs. Device tokens are shortened.
    pub fn log_value(&self) -> String {
        match self {
            Target::Topic(topic) => topic.clone(),
            Target::Token(token) => {
                let prefix: String = token.chars().take(8).collect();
                format!("{}…", prefix)
            }
        }
    }
}

/// Visible part of the notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A validated message ready to hand to a push provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    #[serde(flatten)]
    pub target: Target,
    pub notification: NotificationContent,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(target: Target) -> OutboundMessage {
        OutboundMessage {
            target,
            notification: NotificationContent {
                title: "Hello".to_string(),
                body: "World".to_string(),
                image: None,
            },
            data: BTreeMap::new(),
        }
    }

    #[test]
    fn test_topic_message_has_only_topic_field() {
        let value = serde_json::to_value(message(Target::Topic("news".to_string()))).unwrap();
        assert_eq!(
            value,
            json!({"topic": "news", "notification": {"title": "Hello", "body": "World"}})
        );
    }

    #[test]
    fn test_token_message_with_data_and_image() {
        let mut msg = message(Target::Token("device-token".to_string()));
        msg.notification.image = Some("https://cdn.example.com/p.png".to_string());
        msg.data.insert("type".to_string(), "product".to_string());

        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["token"], "device-token");
        assert!(value.get("topic").is_none());
        assert_eq!(value["notification"]["image"], "https://cdn.example.com/p.png");
        assert_eq!(value["data"]["type"], "product");
    }

    #[test]
    fn test_log_value_shortens_tokens() {
        let token = Target::Token("abcdefghijklmnopqrstuvwxyz".to_string());
        assert_eq!(token.log_value(), "abcdefgh…");
        assert_eq!(Target::Topic("news".to_string()).log_value(), "news");
    }
}
