use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `projects` table and its columns.
#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
    ClientId,
    Name,
    Description,
    Status,
    DaysRemaining,
    CreatedAt,
    UpdatedAt,
}

/// Identifiers for the `employee_tasks` table and its columns.
#[derive(DeriveIden)]
enum EmployeeTasks {
    Table,
    Id,
    EmployeeId,
    ProjectId,
    Title,
    Completed,
    HoursRemaining,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Projects::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Projects::ClientId).uuid().not_null())
                    .col(ColumnDef::new(Projects::Name).string().not_null())
                    .col(ColumnDef::new(Projects::Description).text())
                    .col(ColumnDef::new(Projects::Status).string().not_null())
                    .col(
                        ColumnDef::new(Projects::DaysRemaining)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Projects::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Projects::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EmployeeTasks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmployeeTasks::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EmployeeTasks::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(EmployeeTasks::ProjectId).uuid().not_null())
                    .col(ColumnDef::new(EmployeeTasks::Title).string().not_null())
                    .col(ColumnDef::new(EmployeeTasks::Completed).boolean().not_null())
                    .col(
                        ColumnDef::new(EmployeeTasks::HoursRemaining)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmployeeTasks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EmployeeTasks::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmployeeTasks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await
    }
}
