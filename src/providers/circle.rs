// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Circle Programmable Wallets (W3S) client.
//!
//! Every operation is a single authenticated round trip. Responses come back
//! wrapped in a `{"data": ...}` envelope; callers get the `data` object (or
//! selected fields of it). Any non-2xx answer is surfaced as
//! [`CircleError::Upstream`] carrying the status and raw body text.

use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use crate::config::RelayConfig;

/// Account type for user-controlled wallets (smart contract account).
pub const ACCOUNT_TYPE: &str = "SCA";
/// Display name attached to newly initialised wallets.
pub const WALLET_METADATA_NAME: &str = "My dApp Wallet";
pub const TRANSFER_FEE_LEVEL: &str = "HIGH";

#[derive(Debug, thiserror::Error)]
pub enum CircleError {
    #[error("Circle configuration invalid: {0}")]
    Config(String),

    #[error("Circle returned {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    #[error("Circle request failed: {0}")]
    Request(String),

    #[error("Circle response was invalid: {0}")]
    InvalidResponse(String),
}

/// Input for a user-initiated token transfer.
pub struct TokenTransferRequest<'a> {
    pub user_token: &'a str,
    pub wallet_id: &'a str,
    pub amount: &'a str,
}

/// Challenge the user must complete in the SDK to authorise a transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferChallenge {
    pub challenge_id: String,
    pub transaction_id: String,
}

#[derive(Debug, Clone)]
pub struct CircleClient {
    base_url: Url,
    api_key: String,
    blockchain: String,
    usdc_token_id: String,
    merchant_address: String,
    http: Client,
}

impl CircleClient {
    pub fn new(config: &RelayConfig) -> Result<Self, CircleError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| CircleError::Config(format!("invalid base URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(CircleError::Config(format!(
                "base URL cannot carry a path: {base_url}"
            )));
        }

        let http = Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .map_err(|e| CircleError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            api_key: config.api_key.clone(),
            blockchain: config.blockchain.clone(),
            usdc_token_id: config.usdc_token_id.clone(),
            merchant_address: config.merchant_address.clone(),
            http,
        })
    }

    /// Acquire a social-login token pair for a device (`POST /users/social/token`).
    pub async fn create_social_token(&self, device_id: &str) -> Result<Value, CircleError> {
        let payload = json!({
            "idempotencyKey": new_idempotency_key(),
            "deviceId": device_id
        });
        let envelope = self.post_json(&["users", "social", "token"], &payload).await?;
        into_data(envelope)
    }

    /// Register a user under the given ID (`POST /users`).
    pub async fn create_user(&self, user_id: &str) -> Result<(), CircleError> {
        let payload = json!({ "userId": user_id });
        self.post_json(&["users"], &payload).await?;
        Ok(())
    }

    /// Issue a session token for a user (`POST /users/token`).
    pub async fn create_user_token(&self, user_id: &str) -> Result<Value, CircleError> {
        let payload = json!({ "userId": user_id });
        let envelope = self.post_json(&["users", "token"], &payload).await?;
        into_data(envelope)
    }

    /// Start wallet creation for a user; returns the challenge ID.
    pub async fn initialize_user(&self, user_token: &str) -> Result<String, CircleError> {
        let payload = json!({
            "idempotencyKey": new_idempotency_key(),
            "blockchains": [self.blockchain],
            "accountType": ACCOUNT_TYPE,
            "metadata": [{ "name": WALLET_METADATA_NAME }],
            "userToken": user_token
        });
        let envelope = self.post_json(&["user", "initialize"], &payload).await?;
        let data = into_data(envelope)?;
        required_str(&data, "challengeId")
    }

    pub async fn list_wallets(&self, user_id: &str) -> Result<Value, CircleError> {
        let envelope = self.get_json(&["wallets"], &[("userId", user_id)]).await?;
        into_data(envelope)
    }

    pub async fn wallet_balances(&self, wallet_id: &str) -> Result<Value, CircleError> {
        let envelope = self
            .get_json(&["wallets", wallet_id, "balances"], &[])
            .await?;
        into_data(envelope)
    }

    /// Create a USDC transfer from the user's wallet to the merchant address.
    pub async fn create_token_transfer(
        &self,
        request: TokenTransferRequest<'_>,
    ) -> Result<TransferChallenge, CircleError> {
        let payload = json!({
            "idempotencyKey": new_idempotency_key(),
            "amounts": [request.amount],
            "feeLevel": TRANSFER_FEE_LEVEL,
            "destinationAddress": self.merchant_address,
            "tokenId": self.usdc_token_id,
            "walletId": request.wallet_id,
            "userToken": request.user_token
        });
        let envelope = self.post_json(&["user", "tokenTransfer"], &payload).await?;
        let data = into_data(envelope)?;

        Ok(TransferChallenge {
            challenge_id: required_str(&data, "challengeId")?,
            transaction_id: required_str(&data, "id")?,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, CircleError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CircleError::Config("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<Value, CircleError> {
        let url = self.endpoint(segments)?;
        let path = url.path().to_string();
        debug!(path = %path, "Circle GET");

        let response = self
            .http
            .get(url)
            .query(query)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| CircleError::Request(format!("GET {path} failed: {e}")))?;

        read_envelope(response, "GET", &path).await
    }

    async fn post_json(&self, segments: &[&str], payload: &Value) -> Result<Value, CircleError> {
        let url = self.endpoint(segments)?;
        let path = url.path().to_string();
        debug!(path = %path, "Circle POST");

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| CircleError::Request(format!("POST {path} failed: {e}")))?;

        read_envelope(response, "POST", &path).await
    }
}

async fn read_envelope(response: Response, method: &str, path: &str) -> Result<Value, CircleError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.map_err(|e| {
            warn!(method, path, status = status.as_u16(), error = %e, "Circle error body unreadable");
            CircleError::Request(format!("{method} {path} returned {status}, body read failed: {e}"))
        })?;
        warn!(
            method,
            path,
            status = status.as_u16(),
            "Circle request rejected"
        );
        return Err(CircleError::Upstream { status, body });
    }

    let text = response
        .text()
        .await
        .map_err(|e| CircleError::Request(format!("{method} {path} body read failed: {e}")))?;

    // `POST /users` answers 201 with an empty body.
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&text).map_err(|e| {
        CircleError::InvalidResponse(format!("{method} {path} invalid JSON: {e}"))
    })
}

fn into_data(envelope: Value) -> Result<Value, CircleError> {
    match envelope {
        Value::Object(mut map) => map
            .remove("data")
            .ok_or_else(|| CircleError::InvalidResponse("missing data in response".to_string())),
        _ => Err(CircleError::InvalidResponse(
            "response is not a JSON object".to_string(),
        )),
    }
}

fn required_str(data: &Value, field: &str) -> Result<String, CircleError> {
    data.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| CircleError::InvalidResponse(format!("missing {field} in response data")))
}

fn new_idempotency_key() -> String {
    Uuid::new_v4().to_string()
}
