use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_products_table::Migration),
            Box::new(m20240101_000002_create_warehouses_table::Migration),
            Box::new(m20240101_000003_create_suppliers_table::Migration),
            Box::new(m20240101_000004_create_product_warehouses_table::Migration),
            Box::new(m20240101_000005_create_shipments_table::Migration),
            Box::new(m20240101_000006_seed_initial_data::Migration),
        ]
    }
}

// Shared identifiers for tables referenced by foreign keys.
#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Description,
    UnitPrice,
    Category,
    Sku,
}

#[derive(DeriveIden)]
enum Warehouses {
    Table,
    Id,
    Name,
    Location,
    StorageCapacity,
}

#[derive(DeriveIden)]
enum Suppliers {
    Table,
    Id,
    CompanyName,
    ContactEmail,
    ContactPhone,
    Address,
}

#[derive(DeriveIden)]
enum ProductWarehouses {
    Table,
    Id,
    ProductId,
    WarehouseId,
    Quantity,
    LastUpdated,
}

#[derive(DeriveIden)]
enum Shipments {
    Table,
    Id,
    SupplierId,
    ProductId,
    WarehouseId,
    Quantity,
    ShipmentDate,
    TotalCost,
}

mod m20240101_000001_create_products_table {
    use super::Products;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_products_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Products::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Products::Name).string_len(100).not_null())
                        .col(ColumnDef::new(Products::Description).string_len(200).null())
                        .col(
                            ColumnDef::new(Products::UnitPrice)
                                .decimal_len(16, 2)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Products::Category).string_len(50).null())
                        .col(ColumnDef::new(Products::Sku).string_len(20).null())
                        .to_owned(),
                )
                .await?;

            // NULL SKUs do not collide
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_products_sku")
                        .table(Products::Table)
                        .col(Products::Sku)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await
        }
    }
}

mod m20240101_000002_create_warehouses_table {
    use super::Warehouses;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_warehouses_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Warehouses::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Warehouses::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Warehouses::Name).string_len(50).not_null())
                        .col(
                            ColumnDef::new(Warehouses::Location)
                                .string_len(100)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Warehouses::StorageCapacity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Warehouses::Table).to_owned())
                .await
        }
    }
}

mod m20240101_000003_create_suppliers_table {
    use super::Suppliers;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_suppliers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Suppliers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Suppliers::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Suppliers::CompanyName)
                                .string_len(50)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Suppliers::ContactEmail)
                                .string_len(100)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Suppliers::ContactPhone)
                                .string_len(15)
                                .null(),
                        )
                        .col(ColumnDef::new(Suppliers::Address).string_len(100).null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_suppliers_contact_email")
                        .table(Suppliers::Table)
                        .col(Suppliers::ContactEmail)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Suppliers::Table).to_owned())
                .await
        }
    }
}

mod m20240101_000004_create_product_warehouses_table {
    use super::{ProductWarehouses, Products, Warehouses};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_product_warehouses_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ProductWarehouses::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProductWarehouses::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(ProductWarehouses::ProductId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductWarehouses::WarehouseId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductWarehouses::Quantity)
                                .integer()
                                .not_null()
                                .default(0)
                                .check(Expr::col(ProductWarehouses::Quantity).gte(0)),
                        )
                        .col(
                            ColumnDef::new(ProductWarehouses::LastUpdated)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_warehouses_product_id")
                                .from(ProductWarehouses::Table, ProductWarehouses::ProductId)
                                .to(Products::Table, Products::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_warehouses_warehouse_id")
                                .from(ProductWarehouses::Table, ProductWarehouses::WarehouseId)
                                .to(Warehouses::Table, Warehouses::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            // One stock row per (product, warehouse) pair
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_product_warehouses_pair")
                        .table(ProductWarehouses::Table)
                        .col(ProductWarehouses::ProductId)
                        .col(ProductWarehouses::WarehouseId)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_product_warehouses_warehouse_id")
                        .table(ProductWarehouses::Table)
                        .col(ProductWarehouses::WarehouseId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProductWarehouses::Table).to_owned())
                .await
        }
    }
}

mod m20240101_000005_create_shipments_table {
    use super::{Products, Shipments, Suppliers, Warehouses};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_shipments_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Shipments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Shipments::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Shipments::SupplierId).integer().not_null())
                        .col(ColumnDef::new(Shipments::ProductId).integer().not_null())
                        .col(ColumnDef::new(Shipments::WarehouseId).integer().not_null())
                        .col(ColumnDef::new(Shipments::Quantity).integer().not_null())
                        .col(
                            ColumnDef::new(Shipments::ShipmentDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Shipments::TotalCost)
                                .decimal_len(16, 2)
                                .not_null()
                                .default(0),
                        )
                        // Shipments are history: referenced rows cannot be deleted
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_shipments_supplier_id")
                                .from(Shipments::Table, Shipments::SupplierId)
                                .to(Suppliers::Table, Suppliers::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_shipments_product_id")
                                .from(Shipments::Table, Shipments::ProductId)
                                .to(Products::Table, Products::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_shipments_warehouse_id")
                                .from(Shipments::Table, Shipments::WarehouseId)
                                .to(Warehouses::Table, Warehouses::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            for (name, column) in [
                ("idx_shipments_supplier_id", Shipments::SupplierId),
                ("idx_shipments_product_id", Shipments::ProductId),
                ("idx_shipments_warehouse_id", Shipments::WarehouseId),
            ] {
                manager
                    .create_index(
                        Index::create()
                            .if_not_exists()
                            .name(name)
                            .table(Shipments::Table)
                            .col(column)
                            .to_owned(),
                    )
                    .await?;
            }

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Shipments::Table).to_owned())
                .await
        }
    }
}

mod m20240101_000006_seed_initial_data {
    use super::{ProductWarehouses, Products, Shipments, Suppliers, Warehouses};
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;
    use sea_orm_migration::prelude::*;
    use sea_orm_migration::sea_orm::{ConnectionTrait, DbBackend};

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000006_seed_initial_data"
        }
    }

    fn values_err(e: impl std::fmt::Display) -> DbErr {
        DbErr::Custom(format!("invalid seed row: {}", e))
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            let now = Utc::now();

            let mut products = Query::insert();
            products.into_table(Products::Table).columns([
                Products::Id,
                Products::Name,
                Products::Description,
                Products::UnitPrice,
                Products::Category,
                Products::Sku,
            ]);
            for (id, name, description, price, category, sku) in [
                (1, "Laptop", "High-performance laptop", dec!(999.99), "Electronics", "LAP123"),
                (2, "Smartphone", "Latest smartphone model", dec!(699.99), "Electronics", "PHN456"),
                (3, "Desk Chair", "Ergonomic office chair", dec!(299.99), "Furniture", "CHR789"),
            ] {
                products
                    .values([
                        id.into(),
                        name.into(),
                        description.into(),
                        price.into(),
                        category.into(),
                        sku.into(),
                    ])
                    .map_err(values_err)?;
            }
            manager.exec_stmt(products).await?;

            let mut warehouses = Query::insert();
            warehouses.into_table(Warehouses::Table).columns([
                Warehouses::Id,
                Warehouses::Name,
                Warehouses::Location,
                Warehouses::StorageCapacity,
            ]);
            for (id, name, location, capacity) in [
                (1, "Main Warehouse", "123 Industrial Rd, City", 10_000),
                (2, "East Coast Hub", "456 Distribution Ave, City", 8_000),
                (3, "West Coast Hub", "789 Logistics Blvd, City", 12_000),
            ] {
                warehouses
                    .values([id.into(), name.into(), location.into(), capacity.into()])
                    .map_err(values_err)?;
            }
            manager.exec_stmt(warehouses).await?;

            let mut suppliers = Query::insert();
            suppliers.into_table(Suppliers::Table).columns([
                Suppliers::Id,
                Suppliers::CompanyName,
                Suppliers::ContactEmail,
                Suppliers::ContactPhone,
                Suppliers::Address,
            ]);
            for (id, company, email, phone, address) in [
                (1, "Tech Supplies Inc.", "contact@techsupplies.com", "+1-555-123-4567", "456 Supplier St, City"),
                (2, "Office Furniture Co.", "orders@officefurniture.com", "+1-555-987-6543", "789 Furniture Ave, City"),
                (3, "Global Electronics", "sales@globalelectronics.com", "+1-555-456-7890", "321 Tech Way, City"),
            ] {
                suppliers
                    .values([
                        id.into(),
                        company.into(),
                        email.into(),
                        phone.into(),
                        address.into(),
                    ])
                    .map_err(values_err)?;
            }
            manager.exec_stmt(suppliers).await?;

            let mut stock = Query::insert();
            stock.into_table(ProductWarehouses::Table).columns([
                ProductWarehouses::Id,
                ProductWarehouses::ProductId,
                ProductWarehouses::WarehouseId,
                ProductWarehouses::Quantity,
                ProductWarehouses::LastUpdated,
            ]);
            for (id, product_id, warehouse_id, quantity, days_ago) in [
                (1, 1, 1, 50, 1),
                (2, 1, 2, 30, 2),
                (3, 2, 1, 75, 1),
                (4, 2, 3, 45, 3),
                (5, 3, 2, 25, 1),
            ] {
                stock
                    .values([
                        id.into(),
                        product_id.into(),
                        warehouse_id.into(),
                        quantity.into(),
                        (now - Duration::days(days_ago)).into(),
                    ])
                    .map_err(values_err)?;
            }
            manager.exec_stmt(stock).await?;

            let mut shipments = Query::insert();
            shipments.into_table(Shipments::Table).columns([
                Shipments::Id,
                Shipments::SupplierId,
                Shipments::ProductId,
                Shipments::WarehouseId,
                Shipments::Quantity,
                Shipments::ShipmentDate,
                Shipments::TotalCost,
            ]);
            for (id, supplier_id, product_id, warehouse_id, quantity, days_ago, total) in [
                (1, 1, 1, 1, 20, 5, dec!(19999.80)),
                (2, 3, 2, 3, 15, 3, dec!(10499.85)),
                (3, 2, 3, 2, 10, 1, dec!(2999.90)),
            ] {
                shipments
                    .values([
                        id.into(),
                        supplier_id.into(),
                        product_id.into(),
                        warehouse_id.into(),
                        quantity.into(),
                        (now - Duration::days(days_ago)).into(),
                        total.into(),
                    ])
                    .map_err(values_err)?;
            }
            manager.exec_stmt(shipments).await?;

            // Explicit ids leave Postgres serials behind
            if manager.get_database_backend() == DbBackend::Postgres {
                let db = manager.get_connection();
                for table in [
                    "products",
                    "warehouses",
                    "suppliers",
                    "product_warehouses",
                    "shipments",
                ] {
                    db.execute_unprepared(&format!(
                        "SELECT setval(pg_get_serial_sequence('{table}', 'id'), (SELECT MAX(id) FROM {table}))"
                    ))
                    .await?;
                }
            }

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .exec_stmt(
                    Query::delete()
                        .from_table(Shipments::Table)
                        .and_where(Expr::col(Shipments::Id).is_in([1, 2, 3]))
                        .to_owned(),
                )
                .await?;
            manager
                .exec_stmt(
                    Query::delete()
                        .from_table(ProductWarehouses::Table)
                        .and_where(Expr::col(ProductWarehouses::Id).is_in([1, 2, 3, 4, 5]))
                        .to_owned(),
                )
                .await?;
            manager
                .exec_stmt(
                    Query::delete()
                        .from_table(Suppliers::Table)
                        .and_where(Expr::col(Suppliers::Id).is_in([1, 2, 3]))
                        .to_owned(),
                )
                .await?;
            manager
                .exec_stmt(
                    Query::delete()
                        .from_table(Warehouses::Table)
                        .and_where(Expr::col(Warehouses::Id).is_in([1, 2, 3]))
                        .to_owned(),
                )
                .await?;
            manager
                .exec_stmt(
                    Query::delete()
                        .from_table(Products::Table)
                        .and_where(Expr::col(Products::Id).is_in([1, 2, 3]))
                        .to_owned(),
                )
                .await
        }
    }
}
