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
    dto::{MessageResponse, TagRequest, TagResponse, TagUpdatedResponse},
    errors::{ErrorResponse, ServiceError},
    AppState,
};

const INVALID_NAME: &str = "Tag name is invalid.";
const INVALID_NAME_OR_ID: &str = "Invalid tag name or id.";
const INVALID_ID: &str = "Invalid tag id.";

pub fn tag_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tags).post(create_tag))
        .route("/:id", get(get_tag).put(update_tag).delete(delete_tag))
}

#[utoipa::path(
    get,
    path = "/api/tags",
    summary = "List tags",
    responses(
        (status = 200, description = "Tags retrieved", body = Vec<TagResponse>),
        (status = 404, description = "No tags exist", body = ErrorResponse)
    ),
    tag = "tags"
)]
pub async fn list_tags(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let tags = state.services.tags.list().await?;
    if tags.is_empty() {
        return Err(ServiceError::NotFound("No tags found.".to_string()));
    }
    Ok(Json(tags))
}

#[utoipa::path(
    get,
    path = "/api/tags/{id}",
    summary = "Get tag",
    params(("id" = i32, Path, description = "Tag id")),
    responses(
        (status = 200, description = "Tag retrieved", body = TagResponse),
        (status = 400, description = "Non-numeric id", body = ErrorResponse),
        (status = 404, description = "Tag not found", body = ErrorResponse)
    ),
    tag = "tags"
)]
pub async fn get_tag(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let id = parse_id(id, INVALID_ID)?;
    let tag = state
        .services
        .tags
        .get(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("No tags found with that id.".to_string()))?;
    Ok(Json(tag))
}

#[utoipa::path(
    post,
    path = "/api/tags",
    summary = "Create tag",
    request_body = TagRequest,
    responses(
        (status = 200, description = "Tag created", body = MessageResponse),
        (status = 400, description = "Missing or blank name", body = ErrorResponse)
    ),
    tag = "tags"
)]
pub async fn create_tag(
    State(state): State<AppState>,
    payload: Result<Json<TagRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let request = parse_body(payload, INVALID_NAME)?;
    let created = state.services.tags.create(request.tag_name).await?;

    Ok(Json(MessageResponse::new(format!(
        "The tag {} was created successfully.",
        created.tag_name
    ))))
}

#[utoipa::path(
    put,
    path = "/api/tags/{id}",
    summary = "Rename tag",
    params(("id" = i32, Path, description = "Tag id")),
    request_body = TagRequest,
    responses(
        (status = 200, description = "Tag updated", body = TagUpdatedResponse),
        (status = 400, description = "Blank name or non-numeric id", body = ErrorResponse),
        (status = 404, description = "Tag not found", body = ErrorResponse)
    ),
    tag = "tags"
)]
pub async fn update_tag(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TagRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let id = parse_id(id, INVALID_NAME_OR_ID)?;
    let request = parse_body(payload, INVALID_NAME_OR_ID)?;

    let (rows, tag) = state
        .services
        .tags
        .update(id, request.tag_name)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("No tag found with the id: {}.", id)))?;

    Ok(Json(TagUpdatedResponse {
        message: format!("{} row has been successfully updated.", rows),
        tag,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/tags/{id}",
    summary = "Delete tag",
    params(("id" = i32, Path, description = "Tag id")),
    responses(
        (status = 200, description = "Tag deleted", body = MessageResponse),
        (status = 400, description = "Non-numeric id", body = ErrorResponse),
        (status = 404, description = "Tag not found", body = ErrorResponse)
    ),
    tag = "tags"
)]
pub async fn delete_tag(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let id = parse_id(id, INVALID_ID)?;
    if state.services.tags.delete(id).await? == 0 {
        return Err(ServiceError::NotFound(
            "No tag found with that id.".to_string(),
        ));
    }
    Ok(Json(MessageResponse::new("Tag deleted successfully.")))
}
