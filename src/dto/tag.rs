use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::validate_not_blank;
use crate::entities::{product, tag};

/// Body of `POST /tags` and `PUT /tags/:id`
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct TagRequest {
    #[validate(custom = "validate_not_blank")]
    #[schema(example = "sale")]
    pub tag_name: String,
}

/// A tag with the products carrying it
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TagResponse {
    #[serde(flatten)]
    pub tag: tag::Model,
    pub products: Vec<product::Model>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TagUpdatedResponse {
    pub message: String,
    pub tag: tag::Model,
}
