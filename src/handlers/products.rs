use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use super::common::{parse_body, parse_id};
use crate::{
    dto::{CreateProductRequest, MessageResponse, ProductResponse, UpdateProductRequest},
    errors::{ErrorResponse, ServiceError},
    AppState,
};

const INVALID_INPUT: &str = "Invalid input";
const INVALID_ID: &str = "Invalid product id.";

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

#[utoipa::path(
    get,
    path = "/api/products",
    summary = "List products",
    description = "Every product with its category and tags",
    responses(
        (status = 200, description = "Products retrieved", body = Vec<ProductResponse>),
        (status = 404, description = "No products exist", body = ErrorResponse)
    ),
    tag = "products"
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let products = state.services.products.list().await?;
    if products.is_empty() {
        return Err(ServiceError::NotFound("No products found.".to_string()));
    }
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    summary = "Get product",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product retrieved", body = ProductResponse),
        (status = 400, description = "Non-numeric id", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    tag = "products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let id = parse_id(id, INVALID_ID)?;
    let product = state
        .services
        .products
        .get(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("No products found with that id.".to_string()))?;
    Ok(Json(product))
}

#[utoipa::path(
    post,
    path = "/api/products",
    summary = "Create product",
    description = "Creates the product and its tag associations atomically",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid input or unknown tag/category id", body = ErrorResponse),
        (status = 500, description = "Datastore failure", body = ErrorResponse)
    ),
    tag = "products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let request = parse_body(payload, INVALID_INPUT)?;
    let product = state.services.products.create(request.into()).await?;
    Ok(Json(product))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    summary = "Update product",
    description = "Replaces the product fields; `tagIds` becomes the product's complete tag set",
    params(("id" = i32, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    tag = "products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let id = parse_id(id, INVALID_INPUT)?;
    let request = parse_body(payload, INVALID_INPUT)?;

    let product = state
        .services
        .products
        .update(id, request.into())
        .await?
        .ok_or_else(|| ServiceError::NotFound("Product not found".to_string()))?;
    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    summary = "Delete product",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 400, description = "Non-numeric id", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    tag = "products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let id = parse_id(id, INVALID_ID)?;
    if state.services.products.delete(id).await? == 0 {
        return Err(ServiceError::NotFound(
            "No product found with that id.".to_string(),
        ));
    }
    Ok(Json(MessageResponse::new("Product deleted successfully.")))
}
