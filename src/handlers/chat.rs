use actix_web::{HttpResponse, Responder, web};

use crate::auth::middleware::AuthIdentity;
use crate::models::chat::{MarkRead, NewChatMessage, OpenConversation};
use crate::store::Store;

use super::store_error_response;

/// POST /api/chat/conversations — get or create the thread for a
/// (project, client, optional employee) triple. Answers 501 on a backend
/// without the collaboration segment.
pub async fn open_conversation(
    _identity: AuthIdentity,
    store: web::Data<Store>,
    body: web::Json<OpenConversation>,
) -> impl Responder {
    let collab = match store.collab() {
        Ok(collab) => collab,
        Err(e) => return store_error_response(e),
    };
    match collab.open_conversation(body.into_inner()).await {
        Ok(conversation) => HttpResponse::Ok().json(conversation),
        Err(e) => store_error_response(e),
    }
}

/// GET /api/chat/conversations/{id} — a single thread.
pub async fn get_conversation(
    _identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> impl Responder {
    let collab = match store.collab() {
        Ok(collab) => collab,
        Err(e) => return store_error_response(e),
    };
    let id = path.into_inner();
    match collab.conversation(&id).await {
        Ok(Some(conversation)) => HttpResponse::Ok().json(conversation),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Conversation {id} not found"),
        })),
        Err(e) => store_error_response(e),
    }
}

/// GET /api/chat/conversations/client/{client_id} — a client's threads,
/// most recently active first.
pub async fn get_conversations(
    _identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> impl Responder {
    let collab = match store.collab() {
        Ok(collab) => collab,
        Err(e) => return store_error_response(e),
    };
    match collab.conversations_by_client(&path.into_inner()).await {
        Ok(conversations) => HttpResponse::Ok().json(conversations),
        Err(e) => store_error_response(e),
    }
}

/// POST /api/chat/messages — append a message; the parent thread's
/// last-activity timestamp moves with it.
pub async fn create_message(
    _identity: AuthIdentity,
    store: web::Data<Store>,
    body: web::Json<NewChatMessage>,
) -> impl Responder {
    let collab = match store.collab() {
        Ok(collab) => collab,
        Err(e) => return store_error_response(e),
    };
    match collab.create_message(body.into_inner()).await {
        Ok(message) => HttpResponse::Created().json(message),
        Err(e) => store_error_response(e),
    }
}

/// GET /api/chat/conversations/{id}/messages — the thread in creation
/// order.
pub async fn get_messages(
    _identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> impl Responder {
    let collab = match store.collab() {
        Ok(collab) => collab,
        Err(e) => return store_error_response(e),
    };
    match collab.messages(&path.into_inner()).await {
        Ok(messages) => HttpResponse::Ok().json(messages),
        Err(e) => store_error_response(e),
    }
}

/// POST /api/chat/conversations/{id}/read — mark everything the reader
/// did not send as read.
pub async fn mark_read(
    _identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
    body: web::Json<MarkRead>,
) -> impl Responder {
    let collab = match store.collab() {
        Ok(collab) => collab,
        Err(e) => return store_error_response(e),
    };
    match collab
        .mark_messages_read(&path.into_inner(), &body.reader_id)
        .await
    {
        Ok(count) => HttpResponse::Ok().json(serde_json::json!({ "marked_read": count })),
        Err(e) => store_error_response(e),
    }
}
