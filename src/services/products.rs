use metrics::counter;
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, LoaderTrait, ModelTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::{
    db::DbPool,
    dto::{CreateProductRequest, ProductResponse, UpdateProductRequest},
    entities::{
        category::Entity as Category,
        product::{self, Entity as Product},
        product_tag::{self, Entity as ProductTag},
        tag::{self, Entity as Tag},
    },
    errors::{ResultExt, ServiceError},
};

/// Validated input for a new product
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub product_name: String,
    pub price: Decimal,
    pub stock: i32,
    pub category_id: Option<i32>,
    pub tag_ids: Vec<i32>,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        Self {
            product_name: request.product_name,
            price: request.price,
            stock: request.stock,
            category_id: request.category_id,
            tag_ids: request.tag_ids.unwrap_or_default(),
        }
    }
}

/// Validated replacement values for an existing product.
/// `tag_ids` is the complete desired tag set. `category_id` is left alone
/// when `None` and cleared when `Some(None)`.
#[derive(Debug, Clone)]
pub struct ProductChanges {
    pub product_name: String,
    pub price: Decimal,
    pub stock: i32,
    pub category_id: Option<Option<i32>>,
    pub tag_ids: Vec<i32>,
}

impl From<UpdateProductRequest> for ProductChanges {
    fn from(request: UpdateProductRequest) -> Self {
        Self {
            product_name: request.product_name,
            price: request.price,
            stock: request.stock,
            category_id: request.category_id,
            tag_ids: request.tag_ids,
        }
    }
}

/// Edges to insert and delete to move a product from one tag set to another
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagChanges {
    pub to_add: Vec<i32>,
    pub to_remove: Vec<i32>,
}

impl TagChanges {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Computes the minimal edge changes turning `current` into `requested`.
///
/// Duplicates on either side are ignored and both lists come back sorted.
pub fn reconcile_tags(current: &[i32], requested: &[i32]) -> TagChanges {
    let current: BTreeSet<i32> = current.iter().copied().collect();
    let requested: BTreeSet<i32> = requested.iter().copied().collect();

    TagChanges {
        to_add: requested.difference(&current).copied().collect(),
        to_remove: current.difference(&requested).copied().collect(),
    }
}

fn dedup_ids(ids: &[i32]) -> Vec<i32> {
    ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
}

fn join_ids(ids: &[i32]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

async fn ensure_category_exists<C: ConnectionTrait>(
    conn: &C,
    category_id: i32,
) -> Result<(), ServiceError> {
    let found = Category::find_by_id(category_id)
        .one(conn)
        .await
        .or_db_error("products.category_lookup")?;

    match found {
        Some(_) => Ok(()),
        None => Err(ServiceError::BadRequest(format!(
            "Unknown category id: {}",
            category_id
        ))),
    }
}

/// Fails with a 400 naming every id in `tag_ids` that has no tag row
async fn ensure_tags_exist<C: ConnectionTrait>(
    conn: &C,
    tag_ids: &[i32],
) -> Result<(), ServiceError> {
    if tag_ids.is_empty() {
        return Ok(());
    }

    let found: BTreeSet<i32> = Tag::find()
        .filter(tag::Column::Id.is_in(tag_ids.to_vec()))
        .all(conn)
        .await
        .or_db_error("products.tag_lookup")?
        .into_iter()
        .map(|tag| tag.id)
        .collect();

    let missing: Vec<i32> = tag_ids
        .iter()
        .copied()
        .filter(|id| !found.contains(id))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::BadRequest(format!(
            "Unknown tag id(s): {}",
            join_ids(&missing)
        )))
    }
}

async fn attach_tags<C: ConnectionTrait>(
    conn: &C,
    product_id: i32,
    tag_ids: &[i32],
) -> Result<(), DbErr> {
    if tag_ids.is_empty() {
        return Ok(());
    }

    let rows = tag_ids.iter().map(|&tag_id| product_tag::ActiveModel {
        product_id: Set(product_id),
        tag_id: Set(tag_id),
        ..Default::default()
    });
    ProductTag::insert_many(rows).exec(conn).await?;
    Ok(())
}

async fn load_details<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<Option<ProductResponse>, DbErr> {
    let Some((product, category)) = Product::find_by_id(id)
        .find_also_related(Category)
        .one(conn)
        .await?
    else {
        return Ok(None);
    };

    let tags = product
        .find_related(Tag)
        .order_by_asc(tag::Column::Id)
        .all(conn)
        .await?;

    Ok(Some(ProductResponse {
        product,
        category,
        tags,
    }))
}

/// Service for the product resource and its tag associations
#[derive(Clone)]
pub struct ProductService {
    db_pool: Arc<DbPool>,
}

impl ProductService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// All products in id order with category and tags
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ProductResponse>, ServiceError> {
        let db = &*self.db_pool;

        let rows = Product::find()
            .find_also_related(Category)
            .order_by_asc(product::Column::Id)
            .all(db)
            .await
            .or_db_error("products.list")?;

        let (products, categories): (Vec<_>, Vec<_>) = rows.into_iter().unzip();

        let tags = products
            .load_many_to_many(Tag, ProductTag, db)
            .await
            .or_db_error("products.list.tags")?;

        Ok(products
            .into_iter()
            .zip(categories)
            .zip(tags)
            .map(|((product, category), tags)| ProductResponse {
                product,
                category,
                tags,
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Option<ProductResponse>, ServiceError> {
        let Some(id) = super::row_id(id) else {
            return Ok(None);
        };
        load_details(&*self.db_pool, id)
            .await
            .or_db_error("products.get")
    }

    /// Inserts the product and one association per distinct tag id in a
    /// single transaction.
    #[instrument(skip(self))]
    pub async fn create(&self, input: NewProduct) -> Result<ProductResponse, ServiceError> {
        let tag_ids = dedup_ids(&input.tag_ids);
        let txn = self
            .db_pool
            .begin()
            .await
            .or_db_error("products.create.begin")?;

        if let Some(category_id) = input.category_id {
            ensure_category_exists(&txn, category_id).await?;
        }
        ensure_tags_exist(&txn, &tag_ids).await?;

        let product = product::ActiveModel {
            product_name: Set(input.product_name),
            price: Set(input.price),
            stock: Set(input.stock),
            category_id: Set(input.category_id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .or_db_error("products.create")?;

        attach_tags(&txn, product.id, &tag_ids)
            .await
            .or_db_error("products.create.tags")?;

        let details = load_details(&txn, product.id)
            .await
            .or_db_error("products.create.reload")?;

        txn.commit()
            .await
            .or_db_error("products.create.commit")?;

        counter!("storefront.products.created", 1);
        info!(product_id = product.id, tags = tag_ids.len(), "Product created");

        details.ok_or_else(|| {
            ServiceError::InternalError(format!("Product {} missing after insert", product.id))
        })
    }

    /// Replaces the product's fields and reconciles its tags in a single
    /// transaction. `None` when no product has this id.
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i64,
        changes: ProductChanges,
    ) -> Result<Option<ProductResponse>, ServiceError> {
        let Some(id) = super::row_id(id) else {
            return Ok(None);
        };
        let requested = dedup_ids(&changes.tag_ids);
        let txn = self
            .db_pool
            .begin()
            .await
            .or_db_error("products.update.begin")?;

        let result = Product::update_many()
            .col_expr(product::Column::ProductName, Expr::value(changes.product_name))
            .col_expr(product::Column::Price, Expr::value(changes.price))
            .col_expr(product::Column::Stock, Expr::value(changes.stock))
            .filter(product::Column::Id.eq(id))
            .exec(&txn)
            .await
            .or_db_error("products.update")?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        if let Some(category_id) = changes.category_id {
            if let Some(category_id) = category_id {
                ensure_category_exists(&txn, category_id).await?;
            }
            Product::update_many()
                .col_expr(product::Column::CategoryId, Expr::value(category_id))
                .filter(product::Column::Id.eq(id))
                .exec(&txn)
                .await
                .or_db_error("products.update.category")?;
        }

        ensure_tags_exist(&txn, &requested).await?;

        let current: Vec<i32> = ProductTag::find()
            .filter(product_tag::Column::ProductId.eq(id))
            .all(&txn)
            .await
            .or_db_error("products.update.current_tags")?
            .into_iter()
            .map(|edge| edge.tag_id)
            .collect();

        let diff = reconcile_tags(&current, &requested);
        debug!(added = ?diff.to_add, removed = ?diff.to_remove, "Reconciling product tags");

        if !diff.to_remove.is_empty() {
            ProductTag::delete_many()
                .filter(product_tag::Column::ProductId.eq(id))
                .filter(product_tag::Column::TagId.is_in(diff.to_remove.clone()))
                .exec(&txn)
                .await
                .or_db_error("products.update.remove_tags")?;
        }

        attach_tags(&txn, id, &diff.to_add)
            .await
            .or_db_error("products.update.add_tags")?;

        let details = load_details(&txn, id)
            .await
            .or_db_error("products.update.reload")?;

        txn.commit()
            .await
            .or_db_error("products.update.commit")?;

        counter!("storefront.products.updated", 1);
        info!(product_id = id, "Product updated");
        Ok(details)
    }

    /// Deletes a product; its tag associations go with it
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<u64, ServiceError> {
        let Some(id) = super::row_id(id) else {
            return Ok(0);
        };
        let result = Product::delete_by_id(id)
            .exec(&*self.db_pool)
            .await
            .or_db_error("products.delete")?;

        if result.rows_affected > 0 {
            counter!("storefront.products.deleted", 1);
            info!(product_id = id, "Product deleted");
        }
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn reconcile_adds_and_removes_only_the_difference() {
        let diff = reconcile_tags(&[1, 2, 3], &[2, 3, 4, 5]);
        assert_eq!(diff.to_add, vec![4, 5]);
        assert_eq!(diff.to_remove, vec![1]);
    }

    #[test]
    fn reconcile_with_same_set_is_a_no_op() {
        let diff = reconcile_tags(&[3, 1], &[1, 3, 3]);
        assert!(diff.is_empty());
    }

    #[test]
    fn reconcile_to_empty_removes_everything() {
        let diff = reconcile_tags(&[7, 2], &[]);
        assert!(diff.to_add.is_empty());
        assert_eq!(diff.to_remove, vec![2, 7]);
    }

    #[test]
    fn duplicate_requested_ids_are_added_once() {
        let diff = reconcile_tags(&[], &[4, 4, 1]);
        assert_eq!(diff.to_add, vec![1, 4]);
    }

    #[test]
    fn missing_ids_are_listed_in_order() {
        assert_eq!(join_ids(&[3, 9, 12]), "3, 9, 12");
        assert_eq!(dedup_ids(&[5, 1, 5]), vec![1, 5]);
    }

    proptest! {
        #[test]
        fn applying_changes_yields_the_requested_set(
            current in prop::collection::btree_set(0i32..40, 0..15),
            requested in prop::collection::vec(0i32..40, 0..25),
        ) {
            let current: Vec<i32> = current.into_iter().collect();
            let diff = reconcile_tags(&current, &requested);

            let mut result: BTreeSet<i32> = current.iter().copied().collect();
            for id in &diff.to_remove {
                prop_assert!(result.remove(id));
            }
            for id in &diff.to_add {
                prop_assert!(result.insert(*id));
            }

            let expected: BTreeSet<i32> = requested.iter().copied().collect();
            prop_assert_eq!(result, expected);
        }
    }
}
