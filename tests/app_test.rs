mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use common::{read_json, TestApp};
use serde_json::json;
use storefront_api::middleware_helpers::REQUEST_ID_HEADER;

#[tokio::test]
async fn health_reports_database_up() {
    let app = TestApp::new().await;

    let (status, body) = read_json(app.request(Method::GET, "/health", None).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "up");
    assert_eq!(body["checks"]["database"]["status"], "up");
}

#[tokio::test]
async fn every_response_carries_a_request_id() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/api/categories", None).await;
    let header = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .expect("request id header")
        .to_str()
        .unwrap()
        .to_string();

    let (_, body) = read_json(response).await;
    assert_eq!(body["request_id"], header);
}

#[tokio::test]
async fn caller_request_id_is_echoed_in_errors() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/tags/3")
        .header(REQUEST_ID_HEADER, "trace-me-1")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "trace-me-1");

    let (status, body) = read_json(response).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["request_id"], "trace-me-1");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new().await;

    let (status, body) =
        read_json(app.request(Method::GET, "/api-docs/openapi.json", None).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Storefront API");
    assert!(body["paths"]["/api/products/{id}"].is_object());
}

#[tokio::test]
async fn routes_follow_the_configured_base_path() {
    let app = TestApp::with_config(|cfg| cfg.api_base_path = "/shop/v1".to_string()).await;

    let (status, body) = read_json(
        app.request(
            Method::POST,
            "/shop/v1/tags",
            Some(json!({"tag_name": "new"})),
        )
        .await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "The tag new was created successfully.");

    let response = app.request(Method::GET, "/api/tags", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let (status, doc) =
        read_json(app.request(Method::GET, "/api-docs/openapi.json", None).await).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/shop/v1/products/{id}"].is_object());
    assert!(doc["paths"]["/api/products/{id}"].is_null());
}

#[tokio::test]
async fn unknown_routes_are_not_found() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/api/orders", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
