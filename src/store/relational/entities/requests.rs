pub mod modification_requests {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    /// SeaORM entity for the `modification_requests` table.
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "modification_requests")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub project_id: Uuid,
        pub client_id: Uuid,
        pub title: String,
        #[sea_orm(column_type = "Text")]
        pub details: String,
        pub status: String,
        pub created_at: DateTimeUtc,
        pub updated_at: Option<DateTimeUtc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::requests::ModificationRequest {
        fn from(m: Model) -> Self {
            Self {
                id: m.id.to_string(),
                project_id: m.project_id.to_string(),
                client_id: m.client_id.to_string(),
                title: m.title,
                details: m.details,
                status: m
                    .status
                    .parse()
                    .unwrap_or(crate::models::requests::RequestStatus::Pending),
                created_at: m.created_at,
                updated_at: m.updated_at,
            }
        }
    }
}

pub mod feature_requests {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    /// SeaORM entity for the `feature_requests` table. Estimates are
    /// null until staff set them.
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "feature_requests")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub project_id: Uuid,
        pub client_id: Uuid,
        pub title: String,
        #[sea_orm(column_type = "Text")]
        pub details: String,
        pub status: String,
        pub estimated_cost: Option<i64>,
        pub estimated_days: Option<i32>,
        pub created_at: DateTimeUtc,
        pub updated_at: Option<DateTimeUtc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::requests::FeatureRequest {
        fn from(m: Model) -> Self {
            Self {
                id: m.id.to_string(),
                project_id: m.project_id.to_string(),
                client_id: m.client_id.to_string(),
                title: m.title,
                details: m.details,
                status: m
                    .status
                    .parse()
                    .unwrap_or(crate::models::requests::RequestStatus::Pending),
                estimated_cost: m.estimated_cost,
                estimated_days: m.estimated_days,
                created_at: m.created_at,
                updated_at: m.updated_at,
            }
        }
    }
}
