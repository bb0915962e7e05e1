// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::Json;

use crate::models::Product;

/// Fixed demo catalogue; prices are USDC decimal strings.
pub fn catalogue() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            name: "Product A".to_string(),
            price: "1.0".to_string(),
        },
        Product {
            id: 2,
            name: "Product B".to_string(),
            price: "2.5".to_string(),
        },
    ]
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    responses((status = 200, description = "Product catalogue", body = [Product]))
)]
pub async fn list_products() -> Json<Vec<Product>> {
    Json(catalogue())
}
