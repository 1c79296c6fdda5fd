use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Orders {
    Table,
    CustomerEmail,
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    ClientId,
}

#[derive(DeriveIden)]
enum EmployeeTasks {
    Table,
    EmployeeId,
    ProjectId,
}

#[derive(DeriveIden)]
enum ChatMessages {
    Table,
    ConversationId,
}

#[derive(DeriveIden)]
enum Enrollments {
    Table,
    StudentId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on orders.customer_email — the denormalized join key for
        // client order lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_orders_customer_email")
                    .table(Orders::Table)
                    .col(Orders::CustomerEmail)
                    .to_owned(),
            )
            .await?;

        // Index on projects.client_id for fetching a client's projects
        manager
            .create_index(
                Index::create()
                    .name("idx_projects_client_id")
                    .table(Projects::Table)
                    .col(Projects::ClientId)
                    .to_owned(),
            )
            .await?;

        // Index on employee_tasks.employee_id for workload queries
        manager
            .create_index(
                Index::create()
                    .name("idx_employee_tasks_employee_id")
                    .table(EmployeeTasks::Table)
                    .col(EmployeeTasks::EmployeeId)
                    .to_owned(),
            )
            .await?;

        // Index on employee_tasks.project_id for per-project task lists
        manager
            .create_index(
                Index::create()
                    .name("idx_employee_tasks_project_id")
                    .table(EmployeeTasks::Table)
                    .col(EmployeeTasks::ProjectId)
                    .to_owned(),
            )
            .await?;

        // Index on chat_messages.conversation_id for thread fetches
        manager
            .create_index(
                Index::create()
                    .name("idx_chat_messages_conversation_id")
                    .table(ChatMessages::Table)
                    .col(ChatMessages::ConversationId)
                    .to_owned(),
            )
            .await?;

        // Index on enrollments.student_id for a student's course list
        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_student_id")
                    .table(Enrollments::Table)
                    .col(Enrollments::StudentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_orders_customer_email").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_projects_client_id").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_employee_tasks_employee_id")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_employee_tasks_project_id")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_chat_messages_conversation_id")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_enrollments_student_id").to_owned())
            .await?;

        Ok(())
    }
}
