use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `modification_requests` table and its columns.
#[derive(DeriveIden)]
enum ModificationRequests {
    Table,
    Id,
    ProjectId,
    ClientId,
    Title,
    Details,
    Status,
    CreatedAt,
    UpdatedAt,
}

/// Identifiers for the `feature_requests` table and its columns.
#[derive(DeriveIden)]
enum FeatureRequests {
    Table,
    Id,
    ProjectId,
    ClientId,
    Title,
    Details,
    Status,
    EstimatedCost,
    EstimatedDays,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ModificationRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ModificationRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ModificationRequests::ProjectId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ModificationRequests::ClientId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ModificationRequests::Title)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ModificationRequests::Details)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ModificationRequests::Status)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ModificationRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ModificationRequests::UpdatedAt)
                            .timestamp_with_time_zone(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FeatureRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeatureRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FeatureRequests::ProjectId).uuid().not_null())
                    .col(ColumnDef::new(FeatureRequests::ClientId).uuid().not_null())
                    .col(ColumnDef::new(FeatureRequests::Title).string().not_null())
                    .col(ColumnDef::new(FeatureRequests::Details).text().not_null())
                    .col(ColumnDef::new(FeatureRequests::Status).string().not_null())
                    .col(ColumnDef::new(FeatureRequests::EstimatedCost).big_integer())
                    .col(ColumnDef::new(FeatureRequests::EstimatedDays).integer())
                    .col(
                        ColumnDef::new(FeatureRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FeatureRequests::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FeatureRequests::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(ModificationRequests::Table)
                    .to_owned(),
            )
            .await
    }
}
