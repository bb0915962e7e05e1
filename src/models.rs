// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies for the relay endpoints. Field names are
//! camelCase on the wire to match what the wallet frontend sends and what the
//! Circle SDK expects back. All identifiers are opaque strings; the relay
//! never interprets them.
//!
//! Endpoints that return an upstream `data` object unchanged use
//! `serde_json::Value` and have no model here.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Requests
// =============================================================================

/// Body for `POST /get_otp_tokens`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceIdRequest {
    /// Device ID reported by the Circle web SDK.
    pub device_id: String,
}

/// Body for `POST /get_user_token` and `POST /get_wallets`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserIdRequest {
    pub user_id: String,
}

/// Body for `POST /initialize_wallet`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserTokenRequest {
    /// Short-lived session token issued by `POST /get_user_token`.
    pub user_token: String,
}

/// Body for `POST /create_transfer`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub user_token: String,
    /// Source wallet.
    pub wallet_id: String,
    /// Decimal amount as a string (e.g. "1.5"), passed through untouched.
    pub amount: String,
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppIdResponse {
    /// Circle app ID, `null` when the server has none configured.
    pub app_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserResponse {
    /// Freshly generated user ID registered upstream.
    pub user_id: String,
}

/// Challenge the frontend SDK must execute to finish wallet setup.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeResponse {
    pub challenge_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransferResponse {
    /// Challenge the user confirms in the SDK.
    pub challenge_id: String,
    /// Upstream transaction ID.
    pub transaction_id: String,
}

/// A purchasable catalogue item.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Product {
    pub id: u32,
    pub name: String,
    /// USDC price as a decimal string.
    pub price: String,
}
