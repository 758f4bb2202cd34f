use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_category_table::Migration),
            Box::new(m20240101_000002_create_product_table::Migration),
            Box::new(m20240101_000003_create_tag_table::Migration),
            Box::new(m20240101_000004_create_product_tag_table::Migration),
        ]
    }
}

#[derive(DeriveIden)]
enum Category {
    Table,
    Id,
    CategoryName,
}

#[derive(DeriveIden)]
enum Product {
    Table,
    Id,
    ProductName,
    Price,
    Stock,
    CategoryId,
}

#[derive(DeriveIden)]
enum Tag {
    Table,
    Id,
    TagName,
}

#[derive(DeriveIden)]
enum ProductTag {
    Table,
    Id,
    ProductId,
    TagId,
}

mod m20240101_000001_create_category_table {
    use super::Category;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_category_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Category::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Category::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Category::CategoryName)
                                .string_len(255)
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Category::Table).to_owned())
                .await
        }
    }
}

mod m20240101_000002_create_product_table {
    use super::{Category, Product};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_product_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Product::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Product::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Product::ProductName)
                                .string_len(255)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Product::Price).decimal_len(10, 2).not_null())
                        .col(
                            ColumnDef::new(Product::Stock)
                                .integer()
                                .not_null()
                                .default(10),
                        )
                        .col(ColumnDef::new(Product::CategoryId).integer().null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_category_id")
                                .from(Product::Table, Product::CategoryId)
                                .to(Category::Table, Category::Id)
                                .on_update(ForeignKeyAction::Cascade)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_product_category_id")
                        .table(Product::Table)
                        .col(Product::CategoryId)
                        .if_not_exists()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Product::Table).to_owned())
                .await
        }
    }
}

mod m20240101_000003_create_tag_table {
    use super::Tag;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_tag_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Tag::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Tag::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Tag::TagName).string_len(255).not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Tag::Table).to_owned())
                .await
        }
    }
}

mod m20240101_000004_create_product_tag_table {
    use super::{Product, ProductTag, Tag};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_product_tag_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ProductTag::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProductTag::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(ProductTag::ProductId).integer().not_null())
                        .col(ColumnDef::new(ProductTag::TagId).integer().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_tag_product_id")
                                .from(ProductTag::Table, ProductTag::ProductId)
                                .to(Product::Table, Product::Id)
                                .on_update(ForeignKeyAction::Cascade)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_tag_tag_id")
                                .from(ProductTag::Table, ProductTag::TagId)
                                .to(Tag::Table, Tag::Id)
                                .on_update(ForeignKeyAction::Cascade)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            // One edge per (product, tag) pair
            manager
                .create_index(
                    Index::create()
                        .name("idx_product_tag_pair")
                        .table(ProductTag::Table)
                        .col(ProductTag::ProductId)
                        .col(ProductTag::TagId)
                        .unique()
                        .if_not_exists()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProductTag::Table).to_owned())
                .await
        }
    }
}
