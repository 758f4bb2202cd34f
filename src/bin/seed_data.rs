use anyhow::Context;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tracing::{info, warn};

use storefront_api::{
    config, db,
    services::{CategoryService, NewProduct, ProductService, TagService},
};

const CATEGORIES: &[&str] = &["Shirts", "Shorts", "Music", "Hats", "Shoes"];

const TAGS: &[&str] = &[
    "rock music",
    "pop music",
    "blue",
    "red",
    "green",
    "white",
    "gold",
    "pop culture",
];

/// (name, price, stock, category, tags) with categories and tags by name
const PRODUCTS: &[(&str, Decimal, i32, &str, &[&str])] = &[
    ("Plain T-Shirt", dec!(14.99), 14, "Shirts", &["white", "gold", "pop culture"]),
    ("Running Sneakers", dec!(90.00), 25, "Shoes", &["white"]),
    ("Branded Baseball Hat", dec!(22.99), 12, "Hats", &["rock music", "blue", "red", "green"]),
    (
        "Top 40 Music Compilation Vinyl Record",
        dec!(12.99),
        50,
        "Music",
        &["rock music", "pop music", "pop culture"],
    ),
    ("Cargo Shorts", dec!(29.99), 22, "Shorts", &["blue"]),
];

fn id_of(ids: &[(&str, i32)], name: &str) -> anyhow::Result<i32> {
    ids.iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, id)| *id)
        .with_context(|| format!("seed data references unknown name '{}'", name))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = config::load_config()?;
    config::init_tracing(cfg.log_level(), cfg.log_json);

    info!("=== Storefront API Seed Data ===");
    let pool = Arc::new(db::establish_connection_from_app_config(&cfg).await?);
    db::run_migrations(&pool).await?;

    let categories = CategoryService::new(pool.clone());
    let tags = TagService::new(pool.clone());
    let products = ProductService::new(pool.clone());

    if !categories.list().await?.is_empty() {
        warn!("Catalog already has categories; skipping seed");
        return Ok(());
    }

    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for name in CATEGORIES {
        let created = categories.create((*name).to_string()).await?;
        category_ids.push((*name, created.id));
    }
    info!("  Created {} categories", category_ids.len());

    let mut tag_ids = Vec::with_capacity(TAGS.len());
    for name in TAGS {
        let created = tags.create((*name).to_string()).await?;
        tag_ids.push((*name, created.id));
    }
    info!("  Created {} tags", tag_ids.len());

    for (name, price, stock, category, product_tags) in PRODUCTS {
        let ids = product_tags
            .iter()
            .map(|tag| id_of(&tag_ids, tag))
            .collect::<anyhow::Result<Vec<_>>>()?;

        products
            .create(NewProduct {
                product_name: (*name).to_string(),
                price: *price,
                stock: *stock,
                category_id: Some(id_of(&category_ids, category)?),
                tag_ids: ids,
            })
            .await?;
    }
    info!("  Created {} products with tags", PRODUCTS.len());

    info!("Seed complete");
    Ok(())
}
