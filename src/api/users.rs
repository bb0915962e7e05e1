// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User onboarding endpoints: app ID, device tokens, user creation and
//! session tokens.

use axum::{extract::State, Json};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{AppIdResponse, CreateUserResponse, DeviceIdRequest, UserIdRequest},
    state::AppState,
};

/// Return the Circle app ID the frontend SDK is configured with.
#[utoipa::path(
    get,
    path = "/app_id",
    tag = "Users",
    responses((status = 200, description = "Configured app ID", body = AppIdResponse))
)]
pub async fn get_app_id(State(state): State<AppState>) -> Json<AppIdResponse> {
    Json(AppIdResponse {
        app_id: state.config.app_id.clone(),
    })
}

/// Acquire a device token and encryption key for social/email login.
#[utoipa::path(
    post,
    path = "/get_otp_tokens",
    request_body = DeviceIdRequest,
    tag = "Users",
    responses(
        (status = 200, description = "Upstream `data` object"),
        (status = 502, description = "Upstream unreachable or malformed response")
    )
)]
pub async fn get_otp_tokens(
    State(state): State<AppState>,
    Json(request): Json<DeviceIdRequest>,
) -> Result<Json<Value>, ApiError> {
    let data = state.circle.create_social_token(&request.device_id).await?;
    Ok(Json(data))
}

/// Register a new user under a freshly generated ID.
#[utoipa::path(
    post,
    path = "/create_user",
    tag = "Users",
    responses(
        (status = 200, description = "User created", body = CreateUserResponse),
        (status = 502, description = "Upstream unreachable")
    )
)]
pub async fn create_user(State(state): State<AppState>) -> Result<Json<CreateUserResponse>, ApiError> {
    let user_id = Uuid::new_v4().to_string();
    state.circle.create_user(&user_id).await?;
    info!(user_id = %user_id, "Created Circle user");
    Ok(Json(CreateUserResponse { user_id }))
}

#[utoipa::path(
    post,
    path = "/get_user_token",
    request_body = UserIdRequest,
    tag = "Users",
    responses(
        (status = 200, description = "Upstream `data` object (userToken, encryptionKey)"),
        (status = 502, description = "Upstream unreachable or malformed response")
    )
)]
pub async fn get_user_token(
    State(state): State<AppState>,
    Json(request): Json<UserIdRequest>,
) -> Result<Json<Value>, ApiError> {
    let data = state.circle.create_user_token(&request.user_id).await?;
    Ok(Json(data))
}
