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
    dto::{CategoryRequest, CategoryResponse, CategoryUpdatedResponse, MessageResponse},
    errors::{ErrorResponse, ServiceError},
    AppState,
};

const INVALID_NAME: &str = "Invalid category name.";
const INVALID_NAME_OR_ID: &str = "Invalid category name or id.";
const INVALID_ID: &str = "Invalid category id.";

pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/:id",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
}

#[utoipa::path(
    get,
    path = "/api/categories",
    summary = "List categories",
    description = "Every category with its products",
    responses(
        (status = 200, description = "Categories retrieved", body = Vec<CategoryResponse>),
        (status = 404, description = "No categories exist", body = ErrorResponse),
        (status = 500, description = "Datastore failure", body = ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let categories = state.services.categories.list().await?;
    if categories.is_empty() {
        return Err(ServiceError::NotFound("No categories found.".to_string()));
    }
    Ok(Json(categories))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    summary = "Get category",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category retrieved", body = CategoryResponse),
        (status = 400, description = "Non-numeric id", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let id = parse_id(id, INVALID_ID)?;
    let category = state.services.categories.get(id).await?.ok_or_else(|| {
        ServiceError::NotFound(format!("No categories were found with the id: {}", id))
    })?;
    Ok(Json(category))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    summary = "Create category",
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category created", body = MessageResponse),
        (status = 400, description = "Missing or blank name", body = ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let request = parse_body(payload, INVALID_NAME)?;
    let created = state
        .services
        .categories
        .create(request.category_name)
        .await?;

    Ok(Json(MessageResponse::new(format!(
        "The category {} was created successfully.",
        created.category_name
    ))))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    summary = "Rename category",
    params(("id" = i32, Path, description = "Category id")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryUpdatedResponse),
        (status = 400, description = "Blank name or non-numeric id", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let id = parse_id(id, INVALID_NAME_OR_ID)?;
    let request = parse_body(payload, INVALID_NAME_OR_ID)?;

    let (rows, category) = state
        .services
        .categories
        .update(id, request.category_name)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("No category found with the id: {}.", id)))?;

    Ok(Json(CategoryUpdatedResponse {
        message: format!("{} row has been successfully updated.", rows),
        category,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    summary = "Delete category",
    description = "Products in the category are kept and lose their category",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 400, description = "Non-numeric id", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let id = parse_id(id, INVALID_ID)?;
    let deleted = state.services.categories.delete(id).await?;
    if deleted == 0 {
        return Err(ServiceError::NotFound(format!(
            "No category found with the id: {}",
            id
        )));
    }

    Ok(Json(MessageResponse::new(format!(
        "Category with id: {} was deleted.",
        id
    ))))
}
