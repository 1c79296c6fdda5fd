pub mod clients {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    /// SeaORM entity for the `clients` table.
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "clients")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub name: String,
        #[sea_orm(unique)]
        pub email: String,
        pub password_hash: String,
        pub company: Option<String>,
        pub phone: Option<String>,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::accounts::Client {
        fn from(m: Model) -> Self {
            Self {
                id: m.id.to_string(),
                name: m.name,
                email: m.email,
                password_hash: m.password_hash,
                company: m.company,
                phone: m.phone,
                created_at: m.created_at,
            }
        }
    }
}

pub mod employees {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    /// SeaORM entity for the `employees` table.
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "employees")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub name: String,
        #[sea_orm(unique)]
        pub email: String,
        pub password_hash: String,
        pub job_title: Option<String>,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::accounts::Employee {
        fn from(m: Model) -> Self {
            Self {
                id: m.id.to_string(),
                name: m.name,
                email: m.email,
                password_hash: m.password_hash,
                job_title: m.job_title,
                created_at: m.created_at,
            }
        }
    }
}

pub mod students {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    /// SeaORM entity for the `students` table.
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "students")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub name: String,
        #[sea_orm(unique)]
        pub email: String,
        pub password_hash: String,
        pub phone: Option<String>,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::accounts::Student {
        fn from(m: Model) -> Self {
            Self {
                id: m.id.to_string(),
                name: m.name,
                email: m.email,
                password_hash: m.password_hash,
                phone: m.phone,
                created_at: m.created_at,
            }
        }
    }
}
