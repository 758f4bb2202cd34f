use crate::errors::ServiceError;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
    },
    Json,
};
use tracing::debug;
use validator::Validate;

/// Unwraps a numeric `:id` segment, answering 400 with `message` otherwise.
/// Any `i64` is accepted; ids past the key column's range simply match no row.
pub fn parse_id(
    id: Result<Path<i64>, PathRejection>,
    message: &str,
) -> Result<i64, ServiceError> {
    match id {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            debug!(%rejection, "Rejected path id");
            Err(ServiceError::BadRequest(message.to_string()))
        }
    }
}

/// Unwraps and validates a JSON body; malformed JSON, missing or mistyped
/// fields and failed validation rules all answer 400 with `message`.
pub fn parse_body<T: Validate>(
    payload: Result<Json<T>, JsonRejection>,
    message: &str,
) -> Result<T, ServiceError> {
    let Json(body) = payload.map_err(|rejection| {
        debug!(%rejection, "Rejected request body");
        ServiceError::BadRequest(message.to_string())
    })?;

    body.validate().map_err(|errors| {
        debug!(%errors, "Request body failed validation");
        ServiceError::BadRequest(message.to_string())
    })?;

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::{
        body::Body,
        extract::FromRequest,
        http::{header::CONTENT_TYPE, Request},
    };

    #[derive(Debug, serde::Deserialize, Validate)]
    struct Named {
        #[validate(length(min = 1))]
        name: String,
    }

    async fn extract(raw: &'static str) -> Result<Json<Named>, JsonRejection> {
        let request = Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(raw))
            .unwrap();
        Json::<Named>::from_request(request, &()).await
    }

    #[test]
    fn wide_numeric_ids_are_not_rejected() {
        assert_matches!(parse_id(Ok(Path(99_999_999_999)), "bad id"), Ok(99_999_999_999));
    }

    #[tokio::test]
    async fn failed_validation_answers_bad_request_with_the_route_message() {
        let err = parse_body(extract(r#"{"name": ""}"#).await, "Invalid input").unwrap_err();
        assert_matches!(&err, ServiceError::BadRequest(message) if message == "Invalid input");
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_body_answers_bad_request_with_the_route_message() {
        let err = parse_body(extract("{").await, "Invalid tag name.").unwrap_err();
        assert_matches!(err, ServiceError::BadRequest(message) if message == "Invalid tag name.");
    }

    #[tokio::test]
    async fn valid_body_is_returned() {
        let body = parse_body(extract(r#"{"name": "hat"}"#).await, "Invalid input").unwrap();
        assert_eq!(body.name, "hat");
    }
}
