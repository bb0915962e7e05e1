// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Circle Relay - Wallet-as-a-Service Relay Server
//!
//! A stateless REST relay for a wallet frontend. Each endpoint turns into one
//! authenticated request against the Circle Programmable Wallets (W3S) API
//! and relays the `data` envelope back, or the upstream status and body on
//! failure.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `providers` - Circle W3S client
//! - `config` - Environment configuration
//! - `logging` - Tracing subscriber setup

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod providers;
pub mod state;
