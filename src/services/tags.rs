use metrics::counter;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, LoaderTrait,
    ModelTrait, QueryFilter, QueryOrder,
};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::{
    db::DbPool,
    dto::TagResponse,
    entities::{
        product::{self, Entity as Product},
        product_tag::Entity as ProductTag,
        tag::{self, Entity as Tag},
    },
    errors::{ResultExt, ServiceError},
};

/// Service for the tag resource
#[derive(Clone)]
pub struct TagService {
    db_pool: Arc<DbPool>,
}

impl TagService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// All tags in id order with the products that carry them
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<TagResponse>, ServiceError> {
        let db = &*self.db_pool;

        let tags = Tag::find()
            .order_by_asc(tag::Column::Id)
            .all(db)
            .await
            .or_db_error("tags.list")?;

        let products = tags
            .load_many_to_many(Product, ProductTag, db)
            .await
            .or_db_error("tags.list.products")?;

        Ok(tags
            .into_iter()
            .zip(products)
            .map(|(tag, products)| TagResponse { tag, products })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Option<TagResponse>, ServiceError> {
        let Some(id) = super::row_id(id) else {
            return Ok(None);
        };
        let db = &*self.db_pool;

        let Some(tag) = Tag::find_by_id(id)
            .one(db)
            .await
            .or_db_error("tags.get")?
        else {
            return Ok(None);
        };

        let products = tag
            .find_related(Product)
            .order_by_asc(product::Column::Id)
            .all(db)
            .await
            .or_db_error("tags.get.products")?;

        Ok(Some(TagResponse { tag, products }))
    }

    #[instrument(skip(self))]
    pub async fn create(&self, tag_name: String) -> Result<tag::Model, ServiceError> {
        let created = tag::ActiveModel {
            tag_name: Set(tag_name),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await
        .or_db_error("tags.create")?;

        counter!("storefront.tags.created", 1);
        info!(tag_id = created.id, "Tag created");
        Ok(created)
    }

    /// Renames a tag; `None` when nothing matched the id
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i64,
        tag_name: String,
    ) -> Result<Option<(u64, tag::Model)>, ServiceError> {
        let Some(id) = super::row_id(id) else {
            return Ok(None);
        };
        let db = &*self.db_pool;

        let result = Tag::update_many()
            .col_expr(tag::Column::TagName, Expr::value(tag_name))
            .filter(tag::Column::Id.eq(id))
            .exec(db)
            .await
            .or_db_error("tags.update")?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        let stored = Tag::find_by_id(id)
            .one(db)
            .await
            .or_db_error("tags.update.reload")?;

        Ok(stored.map(|tag| (result.rows_affected, tag)))
    }

    /// Deletes a tag together with its product associations
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<u64, ServiceError> {
        let Some(id) = super::row_id(id) else {
            return Ok(0);
        };
        let result = Tag::delete_by_id(id)
            .exec(&*self.db_pool)
            .await
            .or_db_error("tags.delete")?;

        if result.rows_affected > 0 {
            counter!("storefront.tags.deleted", 1);
            info!(tag_id = id, "Tag deleted");
        }
        Ok(result.rows_affected)
    }
}
