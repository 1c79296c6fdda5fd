use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `chat_conversations` table and its columns.
#[derive(DeriveIden)]
enum ChatConversations {
    Table,
    Id,
    ProjectId,
    ClientId,
    EmployeeId,
    LastActivityAt,
    CreatedAt,
}

/// Identifiers for the `chat_messages` table and its columns.
#[derive(DeriveIden)]
enum ChatMessages {
    Table,
    Id,
    ConversationId,
    SenderId,
    Content,
    IsRead,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChatConversations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ChatConversations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ChatConversations::ProjectId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChatConversations::ClientId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ChatConversations::EmployeeId).uuid())
                    .col(
                        ColumnDef::new(ChatConversations::LastActivityAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChatConversations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ChatMessages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ChatMessages::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ChatMessages::ConversationId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ChatMessages::SenderId).uuid().not_null())
                    .col(ColumnDef::new(ChatMessages::Content).text().not_null())
                    .col(ColumnDef::new(ChatMessages::IsRead).boolean().not_null())
                    .col(
                        ColumnDef::new(ChatMessages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChatMessages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ChatConversations::Table).to_owned())
            .await
    }
}
