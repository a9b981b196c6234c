//! Error response DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of every failed response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "success": false,
    "error": "Provide either topic or token, and title + body",
    "code": "VALIDATION_ERROR"
}))]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    /// Human-readable message
    pub error: String,
    /// Machine-readable error code
    pub code: String,
}

impl ErrorResponse {
    pub fn new(code: &str, error: &str) -> Self {
        Self {
            success: false,
            error: error.to_string(),
            code: code.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_response_shape() {
        let body = serde_json::to_value(ErrorResponse::new("PROVIDER_ERROR", "quota exceeded")).unwrap();
        assert_eq!(
            body,
            json!({"success": false, "error": "quota exceeded", "code": "PROVIDER_ERROR"})
        );
    }
}
