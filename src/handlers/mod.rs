use axum::Router;
use std::sync::Arc;

use crate::{
    db::DbPool,
    services::{CategoryService, ProductService, TagService},
    AppState,
};

pub mod categories;
pub mod common;
pub mod health;
pub mod products;
pub mod tags;

/// Service container shared by every handler through [`AppState`]
#[derive(Clone)]
pub struct AppServices {
    pub categories: Arc<CategoryService>,
    pub products: Arc<ProductService>,
    pub tags: Arc<TagService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            categories: Arc::new(CategoryService::new(db_pool.clone())),
            products: Arc::new(ProductService::new(db_pool.clone())),
            tags: Arc::new(TagService::new(db_pool)),
        }
    }
}

/// The three resource routers, to be mounted under the API base path
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/categories", categories::category_routes())
        .nest("/products", products::product_routes())
        .nest("/tags", tags::tag_routes())
}
