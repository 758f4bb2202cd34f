use axum::{extract::State, response::Json, routing::get, Router};
use utoipa::OpenApi;

use crate::{
    config::DEFAULT_API_BASE_PATH,
    dto::{
        CategoryRequest, CategoryResponse, CategoryUpdatedResponse, CreateProductRequest,
        MessageResponse, ProductResponse, TagRequest, TagResponse, TagUpdatedResponse,
        UpdateProductRequest,
    },
    entities::{category, product, tag},
    errors::ErrorResponse,
    handlers::{categories, products, tags},
    AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        version = "0.1.0",
        description = r#"
# Storefront Catalog API

CRUD over the catalog of a small storefront: categories, products and tags,
with products linked to tags through a join table.

## Errors

Failures share one body shape:

```json
{
  "error": "Not Found",
  "message": "No categories were found with the id: 42",
  "request_id": "4f1c5b9e-...",
  "timestamp": "2024-01-01T00:00:00Z"
}
```

Every response carries an `x-request-id` header; send your own to correlate logs.
"#,
        license(name = "MIT")
    ),
    paths(
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        tags::list_tags,
        tags::get_tag,
        tags::create_tag,
        tags::update_tag,
        tags::delete_tag,
    ),
    components(schemas(
        category::Model,
        product::Model,
        tag::Model,
        CategoryRequest,
        CategoryResponse,
        CategoryUpdatedResponse,
        CreateProductRequest,
        UpdateProductRequest,
        ProductResponse,
        TagRequest,
        TagResponse,
        TagUpdatedResponse,
        MessageResponse,
        ErrorResponse,
    )),
    tags(
        (name = "categories", description = "Product categories"),
        (name = "products", description = "Products with their category and tags"),
        (name = "tags", description = "Free-form product tags"),
    )
)]
pub struct ApiDoc;

/// The generated document with resource paths moved under `base_path`.
///
/// Handlers are annotated against the default base, so that prefix is
/// swapped for the one the router actually nests under.
pub fn api_doc(base_path: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    let base = base_path.trim_end_matches('/');

    doc.paths.paths = std::mem::take(&mut doc.paths.paths)
        .into_iter()
        .map(|(path, item)| match path.strip_prefix(DEFAULT_API_BASE_PATH) {
            Some(rest) => (format!("{base}{rest}"), item),
            None => (path, item),
        })
        .collect();
    doc
}

async fn openapi_json(State(state): State<AppState>) -> Json<utoipa::openapi::OpenApi> {
    Json(api_doc(&state.config.api_base_path))
}

/// Serves the generated document at `/api-docs/openapi.json`
pub fn openapi_routes() -> Router<AppState> {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_resource_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/categories",
            "/api/categories/{id}",
            "/api/products",
            "/api/products/{id}",
            "/api/tags",
            "/api/tags/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn document_paths_follow_the_base_path() {
        let doc = api_doc("/shop/v1");
        assert!(doc.paths.paths.contains_key("/shop/v1/products/{id}"));
        assert!(doc.paths.paths.contains_key("/shop/v1/tags"));
        assert!(doc.paths.paths.keys().all(|path| !path.starts_with("/api/")));

        let root = api_doc("/");
        assert!(root.paths.paths.contains_key("/categories/{id}"));
        assert_eq!(root.paths.paths.len(), ApiDoc::openapi().paths.paths.len());
    }
}
