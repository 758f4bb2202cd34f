//! Data access for the catalog resources.
//!
//! Services own every datastore round trip and hand back entity models or
//! response views; HTTP shaping (status codes, messages) stays in the handlers.

pub mod categories;
pub mod products;
pub mod tags;

pub use categories::CategoryService;
pub use products::{reconcile_tags, NewProduct, ProductChanges, ProductService, TagChanges};
pub use tags::TagService;

/// Narrows a path id to the `i32` key columns; anything wider matches no row.
pub(crate) fn row_id(id: i64) -> Option<i32> {
    i32::try_from(id).ok()
}
