use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `orders` table and its columns.
#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    OrderNumber,
    CustomerName,
    CustomerEmail,
    CustomerPhone,
    ServiceId,
    ServiceName,
    Price,
    DiscountCode,
    Status,
    PaymentStatus,
    PaymentMethod,
    CreatedAt,
    UpdatedAt,
}

/// Identifiers for the `invoices` table and its columns.
#[derive(DeriveIden)]
enum Invoices {
    Table,
    Id,
    InvoiceNumber,
    OrderId,
    CustomerName,
    CustomerEmail,
    ServiceName,
    Amount,
    IssuedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // service_id is intentionally not a foreign key: an order may
        // outlive (or never match) a catalog row.
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Orders::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Orders::OrderNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Orders::CustomerName).string().not_null())
                    .col(ColumnDef::new(Orders::CustomerEmail).string().not_null())
                    .col(ColumnDef::new(Orders::CustomerPhone).string())
                    .col(ColumnDef::new(Orders::ServiceId).uuid())
                    .col(ColumnDef::new(Orders::ServiceName).string())
                    .col(ColumnDef::new(Orders::Price).big_integer().not_null())
                    .col(ColumnDef::new(Orders::DiscountCode).string())
                    .col(ColumnDef::new(Orders::Status).string().not_null())
                    .col(ColumnDef::new(Orders::PaymentStatus).string().not_null())
                    .col(ColumnDef::new(Orders::PaymentMethod).string())
                    .col(
                        ColumnDef::new(Orders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Orders::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // One invoice per order, enforced at the schema level.
        manager
            .create_table(
                Table::create()
                    .table(Invoices::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Invoices::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Invoices::InvoiceNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Invoices::OrderId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Invoices::CustomerName).string().not_null())
                    .col(ColumnDef::new(Invoices::CustomerEmail).string().not_null())
                    .col(ColumnDef::new(Invoices::ServiceName).string())
                    .col(ColumnDef::new(Invoices::Amount).big_integer().not_null())
                    .col(
                        ColumnDef::new(Invoices::IssuedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Invoices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await
    }
}
