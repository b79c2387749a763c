//! Integration tests for Vitrine.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vitrine-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_catalog` - Catalog listing, brand filter, product detail
//! - `storefront_cart` - Cart operations and session isolation
//!
//! Tests drive the real router in-process with [`TestClient`]; no server or
//! network is involved.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;
use vitrine_storefront::catalog::Catalog;
use vitrine_storefront::config::StorefrontConfig;
use vitrine_storefront::data::{BundledSource, CatalogSource};
use vitrine_storefront::routes;
use vitrine_storefront::state::AppState;

/// Build the application over a catalog opened from `source`.
///
/// # Panics
///
/// Panics if the source cannot provide brands or basic products.
pub async fn app_with(source: Arc<dyn CatalogSource>) -> Router {
    let catalog = Catalog::open(source)
        .await
        .unwrap_or_else(|e| panic!("catalog failed to open: {e}"));
    routes::app(AppState::new(StorefrontConfig::default(), catalog))
}

/// Build the application over the bundled datasets.
pub async fn bundled_app() -> Router {
    app_with(Arc::new(BundledSource)).await
}

/// A cookie-keeping client for one browsing session.
#[derive(Clone)]
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    /// Start a new session against `app`.
    #[must_use]
    pub const fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    /// Send a GET request.
    pub async fn get(&mut self, path: &str) -> (StatusCode, Value) {
        self.send(Request::get(path), Body::empty()).await
    }

    /// Send a POST request with a JSON body.
    pub async fn post(&mut self, path: &str, body: &Value) -> (StatusCode, Value) {
        let builder = Request::post(path).header(header::CONTENT_TYPE, "application/json");
        self.send(builder, Body::from(body.to_string())).await
    }

    /// Send a request, carrying the session cookie across calls.
    ///
    /// Non-JSON bodies come back as a JSON string.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails.
    pub async fn send(
        &mut self,
        mut builder: axum::http::request::Builder,
        body: Body,
    ) -> (StatusCode, Value) {
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = builder
            .body(body)
            .unwrap_or_else(|e| panic!("invalid request: {e}"));

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|e| panic!("router error: {e}"));

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            // Keep only `name=value`, dropping attributes
            if let Some(pair) = set_cookie.split(';').next() {
                self.cookie = Some(pair.to_string());
            }
        }

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_else(|e| panic!("unreadable body: {e}"));
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        (status, value)
    }
}

/// Extract product IDs from a JSON array of products.
#[must_use]
pub fn product_ids(products: &Value) -> Vec<i64> {
    products
        .as_array()
        .map(|items| items.iter().filter_map(|p| p["id"].as_i64()).collect())
        .unwrap_or_default()
}

/// Parse a decimal serialized as a JSON string.
///
/// # Panics
///
/// Panics if the value is not a decimal string.
#[must_use]
pub fn decimal(value: &Value) -> rust_decimal::Decimal {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| panic!("not a decimal string: {value}"))
}
