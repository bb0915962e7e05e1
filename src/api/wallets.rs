// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet endpoints: initialisation, listing, balances and transfers.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::{
    error::ApiError,
    models::{ChallengeResponse, TransferRequest, TransferResponse, UserIdRequest, UserTokenRequest},
    providers::circle::TokenTransferRequest,
    state::AppState,
};

/// Start wallet creation for the user; returns the challenge to execute.
#[utoipa::path(
    post,
    path = "/initialize_wallet",
    request_body = UserTokenRequest,
    tag = "Wallets",
    responses(
        (status = 200, description = "Challenge created", body = ChallengeResponse),
        (status = 502, description = "Upstream unreachable or malformed response")
    )
)]
pub async fn initialize_wallet(
    State(state): State<AppState>,
    Json(request): Json<UserTokenRequest>,
) -> Result<Json<ChallengeResponse>, ApiError> {
    let challenge_id = state.circle.initialize_user(&request.user_token).await?;
    Ok(Json(ChallengeResponse { challenge_id }))
}

#[utoipa::path(
    post,
    path = "/get_wallets",
    request_body = UserIdRequest,
    tag = "Wallets",
    responses(
        (status = 200, description = "Upstream `data` object (wallets)"),
        (status = 502, description = "Upstream unreachable or malformed response")
    )
)]
pub async fn get_wallets(
    State(state): State<AppState>,
    Json(request): Json<UserIdRequest>,
) -> Result<Json<Value>, ApiError> {
    let data = state.circle.list_wallets(&request.user_id).await?;
    Ok(Json(data))
}

#[utoipa::path(
    get,
    path = "/get_balance/{wallet_id}",
    tag = "Wallets",
    params(("wallet_id" = String, Path, description = "Circle wallet ID")),
    responses(
        (status = 200, description = "Upstream `data` object (tokenBalances)"),
        (status = 502, description = "Upstream unreachable or malformed response")
    )
)]
pub async fn get_balance(
    State(state): State<AppState>,
    Path(wallet_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let data = state.circle.wallet_balances(&wallet_id).await?;
    Ok(Json(data))
}

/// Create a USDC transfer from the user's wallet to the merchant.
#[utoipa::path(
    post,
    path = "/create_transfer",
    request_body = TransferRequest,
    tag = "Wallets",
    responses(
        (status = 200, description = "Transfer challenge created", body = TransferResponse),
        (status = 502, description = "Upstream unreachable or malformed response")
    )
)]
pub async fn create_transfer(
    State(state): State<AppState>,
    Json(request): Json<TransferRequest>,
) -> Result<Json<TransferResponse>, ApiError> {
    let challenge = state
        .circle
        .create_token_transfer(TokenTransferRequest {
            user_token: &request.user_token,
            wallet_id: &request.wallet_id,
            amount: &request.amount,
        })
        .await?;

    info!(
        wallet_id = %request.wallet_id,
        transaction_id = %challenge.transaction_id,
        "Transfer challenge created"
    );

    Ok(Json(TransferResponse {
        challenge_id: challenge.challenge_id,
        transaction_id: challenge.transaction_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    async fn state_for(server: &MockServer) -> AppState {
        AppState::for_upstream(&format!("{}/v1/w3s", server.uri()))
    }

    #[tokio::test]
    async fn initialize_wallet_returns_only_challenge_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/w3s/user/initialize"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "challengeId": "challenge-1", "extra": true }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let Json(body) = initialize_wallet(
            State(state_for(&server).await),
            Json(UserTokenRequest {
                user_token: "ut".into(),
            }),
        )
        .await
        .expect("wallet initialisation is relayed");

        assert_eq!(
            body,
            ChallengeResponse {
                challenge_id: "challenge-1".into()
            }
        );
    }

    #[tokio::test]
    async fn initialize_wallet_forwards_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/w3s/user/initialize"))
            .respond_with(
                ResponseTemplate::new(409).set_body_string(r#"{"code":155106,"message":"User already initialized"}"#),
            )
            .mount(&server)
            .await;

        let err = initialize_wallet(
            State(state_for(&server).await),
            Json(UserTokenRequest {
                user_token: "ut".into(),
            }),
        )
        .await
        .expect_err("conflict is surfaced");

        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(
            err.message,
            r#"{"code":155106,"message":"User already initialized"}"#
        );
    }

    #[tokio::test]
    async fn get_wallets_queries_by_user_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/w3s/wallets"))
            .and(query_param("userId", "user-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "wallets": [{ "id": "w1", "blockchain": "ETH-SEPOLIA" }] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let Json(data) = get_wallets(
            State(state_for(&server).await),
            Json(UserIdRequest {
                user_id: "user-1".into(),
            }),
        )
        .await
        .expect("wallets are relayed");

        assert_eq!(data["wallets"][0]["id"], "w1");
    }

    #[tokio::test]
    async fn get_balance_targets_wallet_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/w3s/wallets/w1/balances"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "tokenBalances": [{ "amount": "10", "token": { "symbol": "USDC" } }] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let Json(data) = get_balance(State(state_for(&server).await), Path("w1".to_string()))
            .await
            .expect("balance is relayed");

        assert_eq!(data["tokenBalances"][0]["amount"], "10");
    }

    #[tokio::test]
    async fn get_balance_invalid_json_is_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/w3s/wallets/w1/balances"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = get_balance(State(state_for(&server).await), Path("w1".to_string()))
            .await
            .expect_err("garbage body is rejected");
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn create_transfer_maps_challenge_and_transaction_ids() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/w3s/user/tokenTransfer"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "challengeId": "challenge-9", "id": "tx-9" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let Json(body) = create_transfer(
            State(state_for(&server).await),
            Json(TransferRequest {
                user_token: "ut".into(),
                wallet_id: "w1".into(),
                amount: "1.0".into(),
            }),
        )
        .await
        .expect("transfer is relayed");

        assert_eq!(
            body,
            TransferResponse {
                challenge_id: "challenge-9".into(),
                transaction_id: "tx-9".into(),
            }
        );

        let requests = server.received_requests().await.unwrap();
        let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(sent["walletId"], "w1");
        assert_eq!(sent["userToken"], "ut");
        assert_eq!(sent["amounts"], json!(["1.0"]));
    }

    #[tokio::test]
    async fn create_transfer_forwards_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/w3s/user/tokenTransfer"))
            .respond_with(ResponseTemplate::new(400).set_body_string("insufficient balance"))
            .mount(&server)
            .await;

        let err = create_transfer(
            State(state_for(&server).await),
            Json(TransferRequest {
                user_token: "ut".into(),
                wallet_id: "w1".into(),
                amount: "1000000".into(),
            }),
        )
        .await
        .expect_err("400 is surfaced");

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "insufficient balance");
    }
}
