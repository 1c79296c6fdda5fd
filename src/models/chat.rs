use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A conversation thread keyed by (project, client, optional employee).
/// `last_activity_at` is touched whenever a message lands in the thread.
#[derive(Debug, Clone, Serialize)]
pub struct ChatConversation {
    pub id: String,
    pub project_id: String,
    pub client_id: String,
    pub employee_id: Option<String>,
    pub last_activity_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Append-only message. Read state is tracked per message relative to the
/// sender identity: `mark_messages_read` flips everything the reader did
/// not send.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct OpenConversation {
    pub project_id: String,
    pub client_id: String,
    pub employee_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewChatMessage {
    pub conversation_id: String,
    pub sender_id: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkRead {
    pub reader_id: String,
}
