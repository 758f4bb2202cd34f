#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use rust_decimal::Decimal;
use serde_json::Value;
use storefront_api::{config::AppConfig, db, services::NewProduct, AppState};
use tower::ServiceExt;

/// Application harness backed by a private in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Same as [`TestApp::new`] with a chance to adjust the configuration first.
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        // A single connection keeps every query on the same in-memory database.
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;
        adjust(&mut cfg);

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = storefront_api::build_router(state.clone());

        Self { router, state }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json).expect("failed to serialize json request body"),
                )),
            None => builder.body(Body::empty()),
        }
        .expect("failed to build request");

        self.send(request).await
    }

    /// Sends `raw` verbatim as a JSON body, for malformed-payload cases.
    pub async fn request_raw(&self, method: Method, uri: &str, raw: &str) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(raw.to_string()))
            .expect("failed to build request");

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    pub async fn seed_category(&self, name: &str) -> i32 {
        self.state
            .services
            .categories
            .create(name.to_string())
            .await
            .expect("seed category")
            .id
    }

    pub async fn seed_tag(&self, name: &str) -> i32 {
        self.state
            .services
            .tags
            .create(name.to_string())
            .await
            .expect("seed tag")
            .id
    }

    pub async fn seed_product(
        &self,
        name: &str,
        price: &str,
        category_id: Option<i32>,
        tag_ids: Vec<i32>,
    ) -> i32 {
        self.state
            .services
            .products
            .create(NewProduct {
                product_name: name.to_string(),
                price: Decimal::from_str(price).expect("valid price"),
                stock: 10,
                category_id,
                tag_ids,
            })
            .await
            .expect("seed product")
            .product
            .id
    }
}

/// Status plus parsed JSON body.
pub async fn read_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let value = serde_json::from_slice(&bytes).expect("response body is not JSON");
    (status, value)
}

/// Decimal value of a serialized price, whatever its JSON representation.
pub fn price_of(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).expect("price string"),
        Value::Number(n) => Decimal::from_str(&n.to_string()).expect("price number"),
        other => panic!("unexpected price value {other}"),
    }
}

/// Sorted ids of a JSON array of records.
pub fn ids_of(value: &Value) -> Vec<i64> {
    let mut ids: Vec<i64> = value
        .as_array()
        .expect("expected an array")
        .iter()
        .map(|item| item["id"].as_i64().expect("id"))
        .collect();
    ids.sort_unstable();
    ids
}
