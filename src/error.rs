// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::providers::circle::CircleError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }
}

impl From<CircleError> for ApiError {
    fn from(err: CircleError) -> Self {
        match err {
            // Forwarded verbatim: same status, raw upstream body.
            CircleError::Upstream { status, body }
                if status.is_client_error() || status.is_server_error() =>
            {
                Self::new(status, body)
            }
            CircleError::Upstream { status, body } => {
                Self::bad_gateway(format!("Circle returned unexpected status {status}: {body}"))
            }
            other => Self::bad_gateway(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            detail: self.message,
        });
        (self.status, body).into_response()
    }
}
