pub mod projects {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    /// SeaORM entity for the `projects` table.
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "projects")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub client_id: Uuid,
        pub name: String,
        #[sea_orm(column_type = "Text", nullable)]
        pub description: Option<String>,
        pub status: String,
        pub days_remaining: i32,
        pub created_at: DateTimeUtc,
        pub updated_at: Option<DateTimeUtc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::projects::Project {
        fn from(m: Model) -> Self {
            Self {
                id: m.id.to_string(),
                client_id: m.client_id.to_string(),
                name: m.name,
                description: m.description,
                status: m
                    .status
                    .parse()
                    .unwrap_or(crate::models::projects::ProjectStatus::Analysis),
                days_remaining: m.days_remaining,
                created_at: m.created_at,
                updated_at: m.updated_at,
            }
        }
    }
}

pub mod employee_tasks {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    /// SeaORM entity for the `employee_tasks` table.
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "employee_tasks")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub employee_id: Uuid,
        pub project_id: Uuid,
        pub title: String,
        pub completed: bool,
        pub hours_remaining: i32,
        pub created_at: DateTimeUtc,
        pub updated_at: Option<DateTimeUtc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::projects::EmployeeTask {
        fn from(m: Model) -> Self {
            Self {
                id: m.id.to_string(),
                employee_id: m.employee_id.to_string(),
                project_id: m.project_id.to_string(),
                title: m.title,
                completed: m.completed,
                hours_remaining: m.hours_remaining,
                created_at: m.created_at,
                updated_at: m.updated_at,
            }
        }
    }
}
