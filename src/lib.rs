//! Storefront API library
//!
//! A REST back end for a storefront catalog: categories, products, tags and
//! the links between products and tags.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod dto;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod middleware_helpers;
pub mod migrator;
pub mod openapi;
pub mod services;
pub mod tracing;

use axum::Router;
use http::HeaderValue;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::{config::AppConfig, db::DbPool, handlers::AppServices};

/// State shared by every route
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub config: AppConfig,
    pub services: AppServices,
}

impl AppState {
    pub fn new(db: Arc<DbPool>, config: AppConfig) -> Self {
        let services = AppServices::new(db.clone());
        Self {
            db,
            config,
            services,
        }
    }
}

/// CORS policy from config: the listed origins, otherwise permissive in
/// development and same-origin elsewhere.
pub fn cors_layer(cfg: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cfg
        .cors_origins()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if !origins.is_empty() {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    } else if cfg.is_development() {
        ::tracing::info!("Using permissive CORS in the development environment");
        CorsLayer::permissive()
    } else {
        ::tracing::warn!(
            "No CORS origins configured; cross-origin requests will be refused. Set APP__CORS_ALLOWED_ORIGINS to allow them"
        );
        CorsLayer::new()
    }
}

/// Full application router: resource routes under the configured base path,
/// `/health`, the OpenAPI document, and the HTTP middleware stack.
pub fn build_router(state: AppState) -> Router {
    let base_path = state.config.api_base_path.clone();
    let cors = cors_layer(&state.config);

    let router = Router::<AppState>::new()
        .merge(handlers::health::health_routes())
        .merge(openapi::openapi_routes());

    // axum refuses to nest at the root
    let router = if base_path == "/" {
        router.merge(handlers::api_routes())
    } else {
        router.nest(&base_path, handlers::api_routes())
    };

    router
        .layer(crate::tracing::configure_http_tracing())
        .layer(cors)
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
        .with_state(state)
}
