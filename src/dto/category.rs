use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::validate_not_blank;
use crate::entities::{category, product};

/// Body of `POST /categories` and `PUT /categories/:id`
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CategoryRequest {
    #[validate(custom = "validate_not_blank")]
    #[schema(example = "Shirts")]
    pub category_name: String,
}

/// A category with its products eager-loaded
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    #[serde(flatten)]
    pub category: category::Model,
    pub products: Vec<product::Model>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryUpdatedResponse {
    #[schema(example = "1 row has been successfully updated.")]
    pub message: String,
    pub category: category::Model,
}
