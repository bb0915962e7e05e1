// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::{
    config::RelayConfig,
    providers::circle::{CircleClient, CircleError},
};

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub circle: CircleClient,
}

impl AppState {
    pub fn new(config: RelayConfig) -> Result<Self, CircleError> {
        let circle = CircleClient::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            circle,
        })
    }
}

#[cfg(test)]
impl AppState {
    /// State whose Circle client targets a mock upstream.
    pub(crate) fn for_upstream(base_url: &str) -> Self {
        Self::new(RelayConfig::for_tests(base_url)).expect("test state builds")
    }
}
