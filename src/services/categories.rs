use metrics::counter;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, LoaderTrait,
    ModelTrait, QueryFilter, QueryOrder,
};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::{
    db::DbPool,
    dto::CategoryResponse,
    entities::{
        category::{self, Entity as Category},
        product::{self, Entity as Product},
    },
    errors::{ResultExt, ServiceError},
};

/// Service for the category resource
#[derive(Clone)]
pub struct CategoryService {
    db_pool: Arc<DbPool>,
}

impl CategoryService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// All categories in id order, each with its products
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<CategoryResponse>, ServiceError> {
        let db = &*self.db_pool;

        let categories = Category::find()
            .order_by_asc(category::Column::Id)
            .all(db)
            .await
            .or_db_error("categories.list")?;

        let products = categories
            .load_many(Product, db)
            .await
            .or_db_error("categories.list.products")?;

        Ok(categories
            .into_iter()
            .zip(products)
            .map(|(category, products)| CategoryResponse { category, products })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Option<CategoryResponse>, ServiceError> {
        let Some(id) = super::row_id(id) else {
            return Ok(None);
        };
        let db = &*self.db_pool;

        let Some(category) = Category::find_by_id(id)
            .one(db)
            .await
            .or_db_error("categories.get")?
        else {
            return Ok(None);
        };

        let products = category
            .find_related(Product)
            .order_by_asc(product::Column::Id)
            .all(db)
            .await
            .or_db_error("categories.get.products")?;

        Ok(Some(CategoryResponse { category, products }))
    }

    #[instrument(skip(self))]
    pub async fn create(&self, category_name: String) -> Result<category::Model, ServiceError> {
        let created = category::ActiveModel {
            category_name: Set(category_name),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await
        .or_db_error("categories.create")?;

        counter!("storefront.categories.created", 1);
        info!(category_id = created.id, "Category created");
        Ok(created)
    }

    /// Renames a category. Returns the affected-row count with the stored
    /// row, or `None` when nothing matched the id.
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i64,
        category_name: String,
    ) -> Result<Option<(u64, category::Model)>, ServiceError> {
        let Some(id) = super::row_id(id) else {
            return Ok(None);
        };
        let db = &*self.db_pool;

        let result = Category::update_many()
            .col_expr(category::Column::CategoryName, Expr::value(category_name))
            .filter(category::Column::Id.eq(id))
            .exec(db)
            .await
            .or_db_error("categories.update")?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        let stored = Category::find_by_id(id)
            .one(db)
            .await
            .or_db_error("categories.update.reload")?;

        Ok(stored.map(|category| (result.rows_affected, category)))
    }

    /// Deletes a category; products that referenced it keep existing with
    /// no category. Returns the number of rows removed.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<u64, ServiceError> {
        let Some(id) = super::row_id(id) else {
            return Ok(0);
        };
        let result = Category::delete_by_id(id)
            .exec(&*self.db_pool)
            .await
            .or_db_error("categories.delete")?;

        if result.rows_affected > 0 {
            counter!("storefront.categories.deleted", 1);
            info!(category_id = id, "Category deleted");
        }
        Ok(result.rows_affected)
    }
}
