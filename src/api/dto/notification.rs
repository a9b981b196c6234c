//! Notification response DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::services::notifications::DispatchReceipt;

/// Body of a successful send
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "success": true,
    "response": "projects/my-project/messages/0:1500415314455276%31bd1c9631bd1c96",
    "topic": "news"
}))]
pub struct DispatchResponse {
    /// Always `true`
    pub success: bool,
    /// Provider receipt (FCM message name)
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Present for shop notifications only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,
    /// Present for shop notifications only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
}

impl From<DispatchReceipt> for DispatchResponse {
    fn from(receipt: DispatchReceipt) -> Self {
        Self {
            success: true,
            topic: receipt.target.topic().map(String::from),
            token: receipt.target.token().map(String::from),
            response: receipt.response,
            shop_name: receipt.shop_name,
            product_name: receipt.product_name,
        }
    }
}
