// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info_span, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        AppIdResponse, ChallengeResponse, CreateUserResponse, DeviceIdRequest, Product,
        TransferRequest, TransferResponse, UserIdRequest, UserTokenRequest,
    },
    state::AppState,
};

pub mod health;
pub mod products;
pub mod users;
pub mod wallets;

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_allowed_origins);

    let relay_routes = Router::new()
        .route("/app_id", get(users::get_app_id))
        .route("/get_otp_tokens", post(users::get_otp_tokens))
        .route("/create_user", post(users::create_user))
        .route("/get_user_token", post(users::get_user_token))
        .route("/initialize_wallet", post(wallets::initialize_wallet))
        .route("/get_wallets", post(wallets::get_wallets))
        .route("/get_balance/{wallet_id}", get(wallets::get_balance))
        .route("/create_transfer", post(wallets::create_transfer))
        .route("/products", get(products::list_products))
        .route("/health/live", get(health::liveness))
        .with_state(state);

    Router::new()
        .merge(relay_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-");
                    info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                }))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(cors)
}

/// CORS for the wallet frontend: listed origins only, with credentials.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        users::get_app_id,
        users::get_otp_tokens,
        users::create_user,
        users::get_user_token,
        wallets::initialize_wallet,
        wallets::get_wallets,
        wallets::get_balance,
        wallets::create_transfer,
        products::list_products,
        health::liveness
    ),
    components(
        schemas(
            AppIdResponse,
            CreateUserResponse,
            ChallengeResponse,
            TransferResponse,
            DeviceIdRequest,
            UserIdRequest,
            UserTokenRequest,
            TransferRequest,
            Product,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Users", description = "User onboarding and session tokens"),
        (name = "Wallets", description = "Wallet setup, balances and transfers"),
        (name = "Products", description = "Demo product catalogue"),
        (name = "Health", description = "Liveness probe")
    )
)]
struct ApiDoc;
