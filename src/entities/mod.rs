//! sea-orm entities for the catalog tables.
//!
//! Category 1→N Product; Product N↔N Tag through `product_tag`.

pub mod category;
pub mod product;
pub mod product_tag;
pub mod tag;
