//! Router configuration for the API.

use std::time::Duration;

use axum::{Json, Router, http::StatusCode, middleware, routing::get};
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{
    build_cors_layer, json_error_fallback, logging_middleware, preflight_no_content,
    request_id_middleware,
};
use crate::config::Settings;
use crate::state::AppState;

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Last added runs first:
/// 1. Request ID (outermost) so every response carries `x-request-id`
/// 2. Logging, inside the request span
/// 3. Preflight status rewrite, then CORS
/// 4. Compression
/// 5. JSON error shaping for fallback and timeout responses
/// 6. Request timeout (`408`)
///
/// # Routes
/// - `POST /api/send`
/// - `POST /api/send-shop-notification`
/// - `GET /health`
/// - `GET /api-docs/openapi.json`
pub fn create_router(state: AppState, settings: &Settings) -> Router {
    let (router, openapi) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(handlers::health::health_check))
        .nest("/api", handlers::notifications::notification_routes())
        .split_for_parts();

    let router = router.route(
        OPENAPI_PATH,
        get(move || {
            let openapi = openapi.clone();
            async move { Json(openapi) }
        }),
    );

    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(settings.server.request_timeout),
        ))
        .layer(middleware::from_fn(json_error_fallback))
        .layer(CompressionLayer::new())
        .layer(build_cors_layer(&settings.cors))
        .layer(middleware::from_fn(preflight_no_content))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
