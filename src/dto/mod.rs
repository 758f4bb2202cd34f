//! Request payloads and response bodies for the catalog routes.

pub mod category;
pub mod product;
pub mod tag;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::ValidationError;

pub use category::{CategoryRequest, CategoryResponse, CategoryUpdatedResponse};
pub use product::{CreateProductRequest, ProductResponse, UpdateProductRequest};
pub use tag::{TagRequest, TagResponse, TagUpdatedResponse};

/// Body of every plain confirmation response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "The tag sale was created successfully.")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Wraps any present value, `null` included, in `Some` so a field can tell
/// an explicit `null` apart from an omitted key.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Rejects names that are empty once surrounding whitespace is removed
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Must contain at least one non-whitespace character".into());
        return Err(err);
    }
    Ok(())
}

/// Largest price the `DECIMAL(10, 2)` column holds
const MAX_PRICE: Decimal = dec!(99999999.99);

/// Prices must be non-negative and fit `DECIMAL(10, 2)`: at most two
/// fractional digits and eight integer digits.
pub fn validate_price(value: &Decimal) -> Result<(), ValidationError> {
    let mut err = if value.is_sign_negative() && !value.is_zero() {
        ValidationError::new("negative")
    } else if value.normalize().scale() > 2 {
        ValidationError::new("scale")
    } else if *value > MAX_PRICE {
        ValidationError::new("range")
    } else {
        return Ok(());
    };
    err.message = Some("Must be between 0 and 99999999.99 with at most two decimals".into());
    Err(err)
}
