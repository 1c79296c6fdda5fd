use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `courses` table and its columns.
#[derive(DeriveIden)]
enum Courses {
    Table,
    Id,
    Title,
    Description,
    Price,
    LessonCount,
    IsActive,
    CreatedAt,
}

/// Identifiers for the `enrollments` table and its columns.
#[derive(DeriveIden)]
enum Enrollments {
    Table,
    Id,
    StudentId,
    CourseId,
    Progress,
    EnrolledAt,
    UpdatedAt,
}

/// Identifiers for the `lesson_progress` table and its columns.
#[derive(DeriveIden)]
enum LessonProgress {
    Table,
    Id,
    EnrollmentId,
    LessonIndex,
    CompletedAt,
}

/// Identifiers for the `quiz_attempts` table and its columns.
#[derive(DeriveIden)]
enum QuizAttempts {
    Table,
    Id,
    EnrollmentId,
    QuizName,
    Score,
    Passed,
    AttemptedAt,
}

/// Identifiers for the `certificates` table and its columns.
#[derive(DeriveIden)]
enum Certificates {
    Table,
    Id,
    CertificateNumber,
    StudentId,
    CourseId,
    ApprovedBy,
    IssuedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Courses::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Courses::Title)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Courses::Description).text().not_null())
                    .col(ColumnDef::new(Courses::Price).big_integer().not_null())
                    .col(ColumnDef::new(Courses::LessonCount).integer().not_null())
                    .col(ColumnDef::new(Courses::IsActive).boolean().not_null())
                    .col(
                        ColumnDef::new(Courses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrollments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Enrollments::StudentId).uuid().not_null())
                    .col(ColumnDef::new(Enrollments::CourseId).uuid().not_null())
                    .col(ColumnDef::new(Enrollments::Progress).integer().not_null())
                    .col(
                        ColumnDef::new(Enrollments::EnrolledAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Enrollments::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LessonProgress::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LessonProgress::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LessonProgress::EnrollmentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LessonProgress::LessonIndex)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LessonProgress::CompletedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(QuizAttempts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuizAttempts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(QuizAttempts::EnrollmentId).uuid().not_null())
                    .col(ColumnDef::new(QuizAttempts::QuizName).string().not_null())
                    .col(ColumnDef::new(QuizAttempts::Score).integer().not_null())
                    .col(ColumnDef::new(QuizAttempts::Passed).boolean().not_null())
                    .col(
                        ColumnDef::new(QuizAttempts::AttemptedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Certificates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Certificates::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Certificates::CertificateNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Certificates::StudentId).uuid().not_null())
                    .col(ColumnDef::new(Certificates::CourseId).uuid().not_null())
                    .col(ColumnDef::new(Certificates::ApprovedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Certificates::IssuedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Certificates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(QuizAttempts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LessonProgress::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await
    }
}
