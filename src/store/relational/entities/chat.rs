pub mod conversations {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    /// SeaORM entity for the `chat_conversations` table. One thread per
    /// (project, client, optional employee) triple.
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "chat_conversations")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub project_id: Uuid,
        pub client_id: Uuid,
        pub employee_id: Option<Uuid>,
        pub last_activity_at: DateTimeUtc,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::chat::ChatConversation {
        fn from(m: Model) -> Self {
            Self {
                id: m.id.to_string(),
                project_id: m.project_id.to_string(),
                client_id: m.client_id.to_string(),
                employee_id: m.employee_id.map(|id| id.to_string()),
                last_activity_at: m.last_activity_at,
                created_at: m.created_at,
            }
        }
    }
}

pub mod messages {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    /// SeaORM entity for the `chat_messages` table. Append-only.
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "chat_messages")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub conversation_id: Uuid,
        pub sender_id: Uuid,
        #[sea_orm(column_type = "Text")]
        pub content: String,
        pub is_read: bool,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::chat::ChatMessage {
        fn from(m: Model) -> Self {
            Self {
                id: m.id.to_string(),
                conversation_id: m.conversation_id.to_string(),
                sender_id: m.sender_id.to_string(),
                content: m.content,
                is_read: m.is_read,
                created_at: m.created_at,
            }
        }
    }
}
