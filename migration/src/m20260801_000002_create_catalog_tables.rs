use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `services` table and its columns.
#[derive(DeriveIden)]
enum Services {
    Table,
    Id,
    Name,
    Category,
    Price,
    Features,
    IsActive,
    CreatedAt,
}

/// Identifiers for the `discount_codes` table and its columns.
#[derive(DeriveIden)]
enum DiscountCodes {
    Table,
    Id,
    Code,
    PercentOff,
    IsActive,
    ExpiresAt,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Services::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Services::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Services::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Services::Category).string().not_null())
                    .col(ColumnDef::new(Services::Price).big_integer().not_null())
                    .col(ColumnDef::new(Services::Features).json_binary().not_null())
                    .col(ColumnDef::new(Services::IsActive).boolean().not_null())
                    .col(
                        ColumnDef::new(Services::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DiscountCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DiscountCodes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DiscountCodes::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(DiscountCodes::PercentOff)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DiscountCodes::IsActive).boolean().not_null())
                    .col(ColumnDef::new(DiscountCodes::ExpiresAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(DiscountCodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DiscountCodes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Services::Table).to_owned())
            .await
    }
}
