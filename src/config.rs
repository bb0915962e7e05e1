// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values and the
//! [`RelayConfig`] loaded from the environment at startup. A `.env` file in
//! the working directory is read first when present (see `main.rs`).
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `CIRCLE_API_KEY` | Bearer token for the Circle W3S API | Required |
//! | `CIRCLE_APP_ID` | App ID handed to the frontend SDK | Optional |
//! | `CIRCLE_BASE_URL` | Circle W3S base URL | `https://api-sandbox.circle.com/v1/w3s` |
//! | `CIRCLE_BLOCKCHAIN` | Network for new wallets | `ETH-SEPOLIA` |
//! | `CIRCLE_USDC_TOKEN_ID` | Token ID used for transfers | sandbox USDC |
//! | `MERCHANT_ADDRESS` | Destination address for transfers | placeholder |
//! | `UPSTREAM_TIMEOUT_SECS` | Upstream request timeout | `30` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8000` |
//! | `CORS_ALLOWED_ORIGINS` | Comma-separated allowed origins | `http://localhost:5173` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{net::SocketAddr, time::Duration};

pub const CIRCLE_API_KEY_ENV: &str = "CIRCLE_API_KEY";
pub const CIRCLE_APP_ID_ENV: &str = "CIRCLE_APP_ID";
pub const CIRCLE_BASE_URL_ENV: &str = "CIRCLE_BASE_URL";
pub const CIRCLE_BLOCKCHAIN_ENV: &str = "CIRCLE_BLOCKCHAIN";
pub const CIRCLE_USDC_TOKEN_ID_ENV: &str = "CIRCLE_USDC_TOKEN_ID";
pub const MERCHANT_ADDRESS_ENV: &str = "MERCHANT_ADDRESS";
pub const UPSTREAM_TIMEOUT_SECS_ENV: &str = "UPSTREAM_TIMEOUT_SECS";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const CORS_ALLOWED_ORIGINS_ENV: &str = "CORS_ALLOWED_ORIGINS";

/// Circle W3S sandbox endpoint.
pub const DEFAULT_CIRCLE_BASE_URL: &str = "https://api-sandbox.circle.com/v1/w3s";
pub const DEFAULT_BLOCKCHAIN: &str = "ETH-SEPOLIA";
/// USDC on the sandbox network. The real ID comes from `/config/tokens`.
pub const DEFAULT_USDC_TOKEN_ID: &str = "3d1c58b7-6e53-4d3d-8df9-95b4368b5062";
/// Placeholder until a real testnet merchant address is configured.
pub const DEFAULT_MERCHANT_ADDRESS: &str = "0xYourMerchantAddressHere";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
/// Vite dev server.
pub const DEFAULT_CORS_ALLOWED_ORIGINS: &str = "http://localhost:5173";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Relay configuration, immutable after startup.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub api_key: String,
    pub app_id: Option<String>,
    pub base_url: String,
    pub blockchain: String,
    pub usdc_token_id: String,
    pub merchant_address: String,
    pub upstream_timeout: Duration,
    pub bind_addr: SocketAddr,
    pub cors_allowed_origins: Vec<String>,
}

impl RelayConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty or whitespace-only values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let get_or = |name: &str, default: &str| get(name).unwrap_or_else(|| default.to_string());

        let api_key = get(CIRCLE_API_KEY_ENV).ok_or(ConfigError::Missing(CIRCLE_API_KEY_ENV))?;

        let upstream_timeout = match get(UPSTREAM_TIMEOUT_SECS_ENV) {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                    name: UPSTREAM_TIMEOUT_SECS_ENV,
                    reason: e.to_string(),
                })?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        name: UPSTREAM_TIMEOUT_SECS_ENV,
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        };

        let port = match get(PORT_ENV) {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: PORT_ENV,
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };
        let host = get_or(HOST_ENV, DEFAULT_HOST);
        let bind_addr = format!("{host}:{port}")
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                name: HOST_ENV,
                reason: e.to_string(),
            })?;

        let base_url = get_or(CIRCLE_BASE_URL_ENV, DEFAULT_CIRCLE_BASE_URL);
        url::Url::parse(&base_url).map_err(|e| ConfigError::Invalid {
            name: CIRCLE_BASE_URL_ENV,
            reason: e.to_string(),
        })?;

        let cors_allowed_origins = get_or(CORS_ALLOWED_ORIGINS_ENV, DEFAULT_CORS_ALLOWED_ORIGINS)
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            api_key,
            app_id: get(CIRCLE_APP_ID_ENV),
            base_url: base_url.trim_end_matches('/').to_string(),
            blockchain: get_or(CIRCLE_BLOCKCHAIN_ENV, DEFAULT_BLOCKCHAIN),
            usdc_token_id: get_or(CIRCLE_USDC_TOKEN_ID_ENV, DEFAULT_USDC_TOKEN_ID),
            merchant_address: get_or(MERCHANT_ADDRESS_ENV, DEFAULT_MERCHANT_ADDRESS),
            upstream_timeout,
            bind_addr,
            cors_allowed_origins,
        })
    }
}

#[cfg(test)]
pub(crate) const TEST_API_KEY: &str = "TEST_API_KEY:abc:def";

#[cfg(test)]
impl RelayConfig {
    /// Configuration pointing at a mock upstream.
    pub(crate) fn for_tests(base_url: &str) -> Self {
        Self {
            api_key: TEST_API_KEY.to_string(),
            app_id: Some("app-id".to_string()),
            base_url: base_url.to_string(),
            blockchain: DEFAULT_BLOCKCHAIN.to_string(),
            usdc_token_id: "usdc-token".to_string(),
            merchant_address: "0xmerchant".to_string(),
            upstream_timeout: Duration::from_secs(5),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            cors_allowed_origins: vec![DEFAULT_CORS_ALLOWED_ORIGINS.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_api_key_is_set() {
        let config = RelayConfig::from_lookup(lookup_from(&[(CIRCLE_API_KEY_ENV, "key")]))
            .expect("config loads");

        assert_eq!(config.api_key, "key");
        assert_eq!(config.app_id, None);
        assert_eq!(config.base_url, DEFAULT_CIRCLE_BASE_URL);
        assert_eq!(config.blockchain, DEFAULT_BLOCKCHAIN);
        assert_eq!(config.usdc_token_id, DEFAULT_USDC_TOKEN_ID);
        assert_eq!(config.merchant_address, DEFAULT_MERCHANT_ADDRESS);
        assert_eq!(config.upstream_timeout, Duration::from_secs(30));
        assert_eq!(config.bind_addr, "0.0.0.0:8000".parse().unwrap());
        assert_eq!(config.cors_allowed_origins, vec!["http://localhost:5173"]);
    }

    #[test]
    fn missing_api_key_is_rejected() {
        let err = RelayConfig::from_lookup(lookup_from(&[(CIRCLE_APP_ID_ENV, "app")]))
            .expect_err("api key is required");
        assert_eq!(err, ConfigError::Missing(CIRCLE_API_KEY_ENV));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let err = RelayConfig::from_lookup(lookup_from(&[(CIRCLE_API_KEY_ENV, "   ")]))
            .expect_err("blank api key is rejected");
        assert_eq!(err, ConfigError::Missing(CIRCLE_API_KEY_ENV));

        let config = RelayConfig::from_lookup(lookup_from(&[
            (CIRCLE_API_KEY_ENV, "key"),
            (CIRCLE_APP_ID_ENV, ""),
        ]))
        .expect("config loads");
        assert_eq!(config.app_id, None);
    }

    #[test]
    fn overrides_are_trimmed_and_applied() {
        let config = RelayConfig::from_lookup(lookup_from(&[
            (CIRCLE_API_KEY_ENV, " key "),
            (CIRCLE_APP_ID_ENV, "app-123"),
            (CIRCLE_BASE_URL_ENV, "http://127.0.0.1:9999/v1/w3s/"),
            (CIRCLE_BLOCKCHAIN_ENV, "MATIC-AMOY"),
            (UPSTREAM_TIMEOUT_SECS_ENV, "5"),
            (HOST_ENV, "127.0.0.1"),
            (PORT_ENV, "9000"),
            (
                CORS_ALLOWED_ORIGINS_ENV,
                "http://localhost:5173, https://wallet.example.com,",
            ),
        ]))
        .expect("config loads");

        assert_eq!(config.api_key, "key");
        assert_eq!(config.app_id.as_deref(), Some("app-123"));
        assert_eq!(config.base_url, "http://127.0.0.1:9999/v1/w3s");
        assert_eq!(config.blockchain, "MATIC-AMOY");
        assert_eq!(config.upstream_timeout, Duration::from_secs(5));
        assert_eq!(config.bind_addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://localhost:5173", "https://wallet.example.com"]
        );
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let err = RelayConfig::from_lookup(lookup_from(&[
            (CIRCLE_API_KEY_ENV, "key"),
            (PORT_ENV, "eighty"),
        ]))
        .expect_err("port must be numeric");
        assert!(matches!(err, ConfigError::Invalid { name: PORT_ENV, .. }));

        let err = RelayConfig::from_lookup(lookup_from(&[
            (CIRCLE_API_KEY_ENV, "key"),
            (UPSTREAM_TIMEOUT_SECS_ENV, "0"),
        ]))
        .expect_err("timeout must be positive");
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: UPSTREAM_TIMEOUT_SECS_ENV,
                ..
            }
        ));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = RelayConfig::from_lookup(lookup_from(&[
            (CIRCLE_API_KEY_ENV, "key"),
            (CIRCLE_BASE_URL_ENV, "not a url"),
        ]))
        .expect_err("base url must parse");
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: CIRCLE_BASE_URL_ENV,
                ..
            }
        ));
    }
}
