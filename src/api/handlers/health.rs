//! Health check endpoint handler.
//!
//! Reports liveness plus whether the push provider is usable. The provider
//! check is local (credential and project id); it does not call FCM.

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use std::collections::BTreeMap;
use std::time::Instant;

/// Basic health check endpoint.
///
/// # Responses
/// - `200 OK` - Service is healthy
/// - `503 Service Unavailable` - The push provider is misconfigured
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let provider_check = check_provider(&state).await;
    let status = provider_check.status;

    let mut checks = BTreeMap::new();
    checks.insert("push_provider".to_string(), provider_check);

    let response = HealthResponse {
        status,
        version: crate::pkg_version().to_string(),
        timestamp: jiff::Timestamp::now().to_string(),
        checks,
    };

    let code = match status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (code, Json(response))
}

async fn check_provider(state: &AppState) -> ComponentHealth {
    let provider = state.services.dispatcher.provider();
    let start = Instant::now();

    match provider.validate_config().await {
        Ok(()) => ComponentHealth {
            status: HealthStatus::Healthy,
            message: Some(format!("{} configured", provider.name())),
            response_time_ms: Some(start.elapsed().as_millis() as u64),
        },
        Err(e) => {
            tracing::warn!(provider = provider.name(), error = %e, "Push provider health check failed");
            ComponentHealth {
                status: HealthStatus::Unhealthy,
                message: Some(e.message()),
                response_time_ms: Some(start.elapsed().as_millis() as u64),
            }
        }
    }
}
