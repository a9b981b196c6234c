//! Notification endpoints.
//!
//! Both endpoints accept `POST` with a JSON body, answer `OPTIONS` with
//! `204` and reject every other method with `405`.

use axum::{Json, extract::State, http::StatusCode, routing::options};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::NOTIFICATION_TAG;
use crate::api::dto::{DispatchResponse, ErrorResponse};
use crate::error::{AppError, AppResult};
use crate::models::{GenericNotificationRequest, ProductNotificationRequest};
use crate::state::AppState;
use crate::utils::JsonBody;

const ONLY_POST_MESSAGE: &str = "Only POST requests allowed";

pub fn notification_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(send_notification))
        .route("/send", options(preflight).fallback(method_not_allowed))
        .routes(routes!(send_shop_notification))
        .route(
            "/send-shop-notification",
            options(preflight).fallback(method_not_allowed),
        )
}

/// Send a notification to a topic or a single device token
#[utoipa::path(
    post,
    path = "/send",
    request_body = GenericNotificationRequest,
    responses(
        (status = 200, description = "Notification accepted by the provider", body = DispatchResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
        (status = 500, description = "Provider failure", body = ErrorResponse)
    ),
    tag = NOTIFICATION_TAG
)]
pub async fn send_notification(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<GenericNotificationRequest>,
) -> AppResult<Json<DispatchResponse>> {
    let receipt = state.services.dispatcher.dispatch(request.into()).await?;
    Ok(Json(receipt.into()))
}

/// Announce a new product to the shop's topic
#[utoipa::path(
    post,
    path = "/send-shop-notification",
    request_body = ProductNotificationRequest,
    responses(
        (status = 200, description = "Notification accepted by the provider", body = DispatchResponse),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
        (status = 500, description = "Provider failure", body = ErrorResponse)
    ),
    tag = NOTIFICATION_TAG
)]
pub async fn send_shop_notification(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ProductNotificationRequest>,
) -> AppResult<Json<DispatchResponse>> {
    let receipt = state.services.dispatcher.dispatch(request.into()).await?;
    Ok(Json(receipt.into()))
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed {
        message: ONLY_POST_MESSAGE.to_string(),
    }
}
