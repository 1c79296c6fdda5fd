pub mod orders {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    /// SeaORM entity for the `orders` table. `service_id` is nullable:
    /// an order created against an unknown service keeps a null link.
    /// The customer email doubles as the denormalized join key for
    /// client lookups.
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "orders")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        #[sea_orm(unique)]
        pub order_number: String,
        pub customer_name: String,
        pub customer_email: String,
        pub customer_phone: Option<String>,
        pub service_id: Option<Uuid>,
        pub service_name: Option<String>,
        pub price: i64,
        pub discount_code: Option<String>,
        pub status: String,
        pub payment_status: String,
        pub payment_method: Option<String>,
        pub created_at: DateTimeUtc,
        pub updated_at: Option<DateTimeUtc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::orders::Order {
        fn from(m: Model) -> Self {
            Self {
                id: m.id.to_string(),
                order_number: m.order_number,
                customer_name: m.customer_name,
                customer_email: m.customer_email,
                customer_phone: m.customer_phone,
                service: crate::models::orders::ServiceRef::from(
                    m.service_id.map(|id| id.to_string()),
                ),
                service_name: m.service_name,
                price: m.price,
                discount_code: m.discount_code,
                status: m
                    .status
                    .parse()
                    .unwrap_or(crate::models::orders::OrderStatus::Pending),
                payment_status: m
                    .payment_status
                    .parse()
                    .unwrap_or(crate::models::orders::PaymentStatus::Pending),
                payment_method: m.payment_method,
                created_at: m.created_at,
                updated_at: m.updated_at,
            }
        }
    }
}

pub mod invoices {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    /// SeaORM entity for the `invoices` table. Rows are append-only
    /// snapshots; no update path exists.
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "invoices")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        #[sea_orm(unique)]
        pub invoice_number: String,
        #[sea_orm(unique)]
        pub order_id: Uuid,
        pub customer_name: String,
        pub customer_email: String,
        pub service_name: Option<String>,
        pub amount: i64,
        pub issued_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::orders::Invoice {
        fn from(m: Model) -> Self {
            Self {
                id: m.id.to_string(),
                invoice_number: m.invoice_number,
                order_id: m.order_id.to_string(),
                customer_name: m.customer_name,
                customer_email: m.customer_email,
                service_name: m.service_name,
                amount: m.amount,
                issued_at: m.issued_at,
            }
        }
    }
}
