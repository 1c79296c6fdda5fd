pub mod services {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    /// SeaORM entity for the `services` table. The name is the natural
    /// key the idempotent seeding path conflicts on.
    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "services")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        #[sea_orm(unique)]
        pub name: String,
        pub category: String,
        pub price: i64,
        pub features: Json,
        pub is_active: bool,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::catalog::Service {
        fn from(m: Model) -> Self {
            Self {
                id: m.id.to_string(),
                name: m.name,
                category: m
                    .category
                    .parse()
                    .unwrap_or(crate::models::catalog::ServiceCategory::Other),
                price: m.price,
                features: serde_json::from_value(m.features).unwrap_or_default(),
                is_active: m.is_active,
                created_at: m.created_at,
            }
        }
    }
}

pub mod discount_codes {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    /// SeaORM entity for the `discount_codes` table.
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "discount_codes")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        #[sea_orm(unique)]
        pub code: String,
        pub percent_off: i32,
        pub is_active: bool,
        pub expires_at: Option<DateTimeUtc>,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::catalog::DiscountCode {
        fn from(m: Model) -> Self {
            Self {
                id: m.id.to_string(),
                code: m.code,
                percent_off: m.percent_off,
                is_active: m.is_active,
                expires_at: m.expires_at,
                created_at: m.created_at,
            }
        }
    }
}
