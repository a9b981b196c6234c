//! Inbound notification requests and their validation.
//!
//! Both request shapes are deserialized leniently (every field optional) so
//! that missing fields surface as validation errors with a stable message
//! instead of JSON decoding errors.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::{Number, Value};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};
use crate::models::notification::{NotificationContent, OutboundMessage, Target};

pub const GENERIC_REQUIRED_MESSAGE: &str = "Provide either topic or token, and title + body";
pub const TARGET_CONFLICT_MESSAGE: &str = "Provide either topic or token, not both";
pub const PRODUCT_REQUIRED_MESSAGE: &str =
    "Missing required fields: shopId, shopName, productName, productId";
const TOPIC_FORMAT_MESSAGE: &str = "Topic names may only contain letters, digits and -_.~%";
const SHOP_TOPIC_MESSAGE: &str = "shopId contains characters that are not allowed in a topic name";

const TOPIC_PREFIX: &str = "/topics/";

static TOPIC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\-_.~%]+$").expect("topic pattern is valid"));

// ============================================================================
// Request types
// ============================================================================

/// Body of `POST /api/send`
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_generic_request"))]
pub struct GenericNotificationRequest {
    /// Topic name, optionally prefixed with `/topics/`
    #[validate(custom(function = "validate_topic_name"))]
    #[schema(example = "news")]
    pub topic: Option<String>,
    /// Device registration token
    pub token: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    /// Image URL shown with the notification
    pub image: Option<String>,
    /// Extra key/value data; values are sent as strings
    #[schema(value_type = Option<Object>)]
    pub data: Option<HashMap<String, Value>>,
}

/// Body of `POST /api/send-shop-notification`
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_product_request"))]
pub struct ProductNotificationRequest {
    /// Shop identifier (string or number)
    #[schema(value_type = String, example = "42")]
    pub shop_id: Option<Value>,
    pub shop_name: Option<String>,
    /// Product identifier (string or number)
    #[schema(value_type = String)]
    pub product_id: Option<Value>,
    pub product_name: Option<String>,
    pub product_image: Option<String>,
    /// Price (string or number)
    #[schema(value_type = Option<String>)]
    pub product_price: Option<Value>,
    pub product_description: Option<String>,
}

/// Every request shape the dispatcher accepts
#[derive(Debug, Clone)]
pub enum NotificationRequest {
    Generic(GenericNotificationRequest),
    Product(ProductNotificationRequest),
}

impl From<GenericNotificationRequest> for NotificationRequest {
    fn from(request: GenericNotificationRequest) -> Self {
        NotificationRequest::Generic(request)
    }
}

impl From<ProductNotificationRequest> for NotificationRequest {
    fn from(request: ProductNotificationRequest) -> Self {
        NotificationRequest::Product(request)
    }
}

/// Result of validating a request: the message to send plus the fields
/// echoed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedNotification {
    pub message: OutboundMessage,
    pub shop_name: Option<String>,
    pub product_name: Option<String>,
}

impl NotificationRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            NotificationRequest::Generic(_) => "generic",
            NotificationRequest::Product(_) => "product",
        }
    }

    /// Validate the request and derive the outbound message.
    pub fn prepare(&self) -> AppResult<PreparedNotification> {
        match self {
            NotificationRequest::Generic(request) => {
                request.validate()?;
                let message = request.build_message().map_err(request_error)?;
                Ok(PreparedNotification {
                    message,
                    shop_name: None,
                    product_name: None,
                })
            }
            NotificationRequest::Product(request) => {
                request.validate()?;
                let message = request.build_message().map_err(request_error)?;
                Ok(PreparedNotification {
                    message,
                    shop_name: request.shop_name.clone(),
                    product_name: request.product_name.clone(),
                })
            }
        }
    }
}

// ============================================================================
// Message construction
// ============================================================================

impl GenericNotificationRequest {
    fn build_message(&self) -> Result<OutboundMessage, ValidationError> {
        let topic = present(self.topic.as_deref());
        let token = present(self.token.as_deref());
        let title = present(self.title.as_deref());
        let body = present(self.body.as_deref());

        let (Some(title), Some(body)) = (title, body) else {
            return Err(failure("required", GENERIC_REQUIRED_MESSAGE));
        };

        let target = match (topic, token) {
            (Some(_), Some(_)) => return Err(failure("target_conflict", TARGET_CONFLICT_MESSAGE)),
            (None, None) => return Err(failure("required", GENERIC_REQUIRED_MESSAGE)),
            (Some(topic), None) => Target::Topic(normalize_topic(topic).to_string()),
            (None, Some(token)) => Target::Token(token.to_string()),
        };

        let data = self
            .data
            .iter()
            .flatten()
            .map(|(key, value)| (key.clone(), coerce_to_string(value)))
            .collect();

        Ok(OutboundMessage {
            target,
            notification: NotificationContent {
                title: title.to_string(),
                body: body.to_string(),
                image: present(self.image.as_deref()).map(str::to_string),
            },
            data,
        })
    }
}

impl ProductNotificationRequest {
    fn build_message(&self) -> Result<OutboundMessage, ValidationError> {
        let shop_id = self.shop_id.as_ref().and_then(scalar_id);
        let product_id = self.product_id.as_ref().and_then(scalar_id);
        let shop_name = present(self.shop_name.as_deref());
        let product_name = present(self.product_name.as_deref());

        let (Some(shop_id), Some(shop_name), Some(product_name), Some(product_id)) =
            (shop_id, shop_name, product_name, product_id)
        else {
            return Err(failure("required", PRODUCT_REQUIRED_MESSAGE));
        };

        let topic = format!("shop_{}_notifications", shop_id);
        if !TOPIC_PATTERN.is_match(&topic) {
            return Err(failure("topic_format", SHOP_TOPIC_MESSAGE));
        }

        let product_image = present(self.product_image.as_deref());
        let product_price = self
            .product_price
            .as_ref()
            .map(coerce_to_string)
            .unwrap_or_default();

        let data = BTreeMap::from([
            ("type".to_string(), "product".to_string()),
            ("productId".to_string(), product_id),
            ("shopId".to_string(), shop_id),
            ("shopName".to_string(), shop_name.to_string()),
            ("productName".to_string(), product_name.to_string()),
            ("productImage".to_string(), product_image.unwrap_or_default().to_string()),
            ("productPrice".to_string(), product_price),
            (
                "productDescription".to_string(),
                self.product_description.clone().unwrap_or_default(),
            ),
        ]);

        Ok(OutboundMessage {
            target: Target::Topic(topic),
            notification: NotificationContent {
                title: format!("New product in {}", shop_name),
                body: format!("{} just arrived!", product_name),
                image: product_image.map(str::to_string),
            },
            data,
        })
    }
}

// ============================================================================
// Validator hooks
// ============================================================================

fn validate_generic_request(request: &GenericNotificationRequest) -> Result<(), ValidationError> {
    request.build_message().map(|_| ())
}

fn validate_product_request(request: &ProductNotificationRequest) -> Result<(), ValidationError> {
    request.build_message().map(|_| ())
}

/// Blank topics count as absent and are left to the target check.
fn validate_topic_name(topic: &str) -> Result<(), ValidationError> {
    if topic.trim().is_empty() || is_valid_topic(topic) {
        Ok(())
    } else {
        Err(failure("topic_format", TOPIC_FORMAT_MESSAGE))
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Whether `topic` (with or without the `/topics/` prefix) matches the FCM topic grammar.
pub fn is_valid_topic(topic: &str) -> bool {
    TOPIC_PATTERN.is_match(normalize_topic(topic))
}

fn normalize_topic(topic: &str) -> &str {
    topic.strip_prefix(TOPIC_PREFIX).unwrap_or(topic)
}

/// `None` for missing or whitespace-only strings.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Identifiers may arrive as JSON strings or numbers.
fn scalar_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(number_to_string(n)),
        _ => None,
    }
}

/// Integral floats render without a fraction: `42.0` becomes `"42"`.
fn number_to_string(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            (f as i64).to_string()
        }
        _ => n.to_string(),
    }
}

/// FCM data payloads only carry strings.
fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => number_to_string(n),
        other => other.to_string(),
    }
}

fn failure(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn request_error(error: ValidationError) -> AppError {
    AppError::Validation {
        field: "request".to_string(),
        reason: error
            .message
            .map(|m| m.into_owned())
            .unwrap_or_else(|| error.code.into_owned()),
    }
}
