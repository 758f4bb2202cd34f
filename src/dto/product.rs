use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{deserialize_some, validate_not_blank, validate_price};
use crate::entities::{category, product, tag};

/// Body of `POST /products`; `tagIds` may be omitted
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(custom = "validate_not_blank")]
    #[schema(example = "Plain T-Shirt")]
    pub product_name: String,
    #[validate(custom = "validate_price")]
    #[schema(value_type = f64, example = 14.99)]
    pub price: Decimal,
    #[validate(range(min = 0))]
    #[schema(example = 14)]
    pub stock: i32,
    #[serde(default)]
    pub category_id: Option<i32>,
    #[serde(default, rename = "tagIds", alias = "tag_ids")]
    pub tag_ids: Option<Vec<i32>>,
}

/// Body of `PUT /products/:id`; `tagIds` is the complete desired tag set
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(custom = "validate_not_blank")]
    pub product_name: String,
    #[validate(custom = "validate_price")]
    #[schema(value_type = f64, example = 14.99)]
    pub price: Decimal,
    #[validate(range(min = 0))]
    pub stock: i32,
    /// Left unchanged when omitted; `null` detaches the category
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<i32>)]
    pub category_id: Option<Option<i32>>,
    #[serde(rename = "tagIds", alias = "tag_ids")]
    pub tag_ids: Vec<i32>,
}

/// A product with its category and tags eager-loaded
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    #[serde(flatten)]
    pub product: product::Model,
    pub category: Option<category::Model>,
    pub tags: Vec<tag::Model>,
}
