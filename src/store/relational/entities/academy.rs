pub mod courses {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    /// SeaORM entity for the `courses` table. The title is the natural
    /// key the seeding path conflicts on.
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "courses")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        #[sea_orm(unique)]
        pub title: String,
        #[sea_orm(column_type = "Text")]
        pub description: String,
        pub price: i64,
        pub lesson_count: i32,
        pub is_active: bool,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::academy::Course {
        fn from(m: Model) -> Self {
            Self {
                id: m.id.to_string(),
                title: m.title,
                description: m.description,
                price: m.price,
                lesson_count: m.lesson_count,
                is_active: m.is_active,
                created_at: m.created_at,
            }
        }
    }
}

pub mod enrollments {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    /// SeaORM entity for the `enrollments` table. `progress` is stored
    /// exactly as callers set it.
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "enrollments")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub student_id: Uuid,
        pub course_id: Uuid,
        pub progress: i32,
        pub enrolled_at: DateTimeUtc,
        pub updated_at: Option<DateTimeUtc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::academy::Enrollment {
        fn from(m: Model) -> Self {
            Self {
                id: m.id.to_string(),
                student_id: m.student_id.to_string(),
                course_id: m.course_id.to_string(),
                progress: m.progress,
                enrolled_at: m.enrolled_at,
                updated_at: m.updated_at,
            }
        }
    }
}

pub mod lesson_progress {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    /// SeaORM entity for the `lesson_progress` table.
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "lesson_progress")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub enrollment_id: Uuid,
        pub lesson_index: i32,
        pub completed_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::academy::LessonProgress {
        fn from(m: Model) -> Self {
            Self {
                id: m.id.to_string(),
                enrollment_id: m.enrollment_id.to_string(),
                lesson_index: m.lesson_index,
                completed_at: m.completed_at,
            }
        }
    }
}

pub mod quiz_attempts {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    /// SeaORM entity for the `quiz_attempts` table.
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "quiz_attempts")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub enrollment_id: Uuid,
        pub quiz_name: String,
        pub score: i32,
        pub passed: bool,
        pub attempted_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::academy::QuizAttempt {
        fn from(m: Model) -> Self {
            Self {
                id: m.id.to_string(),
                enrollment_id: m.enrollment_id.to_string(),
                quiz_name: m.quiz_name,
                score: m.score,
                passed: m.passed,
                attempted_at: m.attempted_at,
            }
        }
    }
}

pub mod certificates {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    /// SeaORM entity for the `certificates` table. `approved_by` is the
    /// employee who signed the issue off.
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "certificates")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        #[sea_orm(unique)]
        pub certificate_number: String,
        pub student_id: Uuid,
        pub course_id: Uuid,
        pub approved_by: Uuid,
        pub issued_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::academy::Certificate {
        fn from(m: Model) -> Self {
            Self {
                id: m.id.to_string(),
                certificate_number: m.certificate_number,
                student_id: m.student_id.to_string(),
                course_id: m.course_id.to_string(),
                approved_by: m.approved_by.to_string(),
                issued_at: m.issued_at,
            }
        }
    }
}
