use actix_web::{HttpResponse, Responder, web};

use crate::auth::middleware::AuthIdentity;
use crate::store::Store;

use super::store_error_response;

/// GET /api/clients — client directory (staff only).
pub async fn get_clients(
    identity: AuthIdentity,
    store: web::Data<Store>,
) -> actix_web::Result<impl Responder> {
    identity.require_employee()?;
    Ok(match store.entities().clients().await {
        Ok(clients) => HttpResponse::Ok().json(clients),
        Err(e) => store_error_response(e),
    })
}

/// GET /api/clients/{id} — a single client (requires authentication).
pub async fn get_client(
    _identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();
    match store.entities().client(&id).await {
        Ok(Some(client)) => HttpResponse::Ok().json(client),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Client {id} not found"),
        })),
        Err(e) => store_error_response(e),
    }
}

/// GET /api/employees — staff directory (staff only).
pub async fn get_employees(
    identity: AuthIdentity,
    store: web::Data<Store>,
) -> actix_web::Result<impl Responder> {
    identity.require_employee()?;
    Ok(match store.entities().employees().await {
        Ok(employees) => HttpResponse::Ok().json(employees),
        Err(e) => store_error_response(e),
    })
}

/// GET /api/employees/{id} — a single employee (requires authentication).
pub async fn get_employee(
    _identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();
    match store.entities().employee(&id).await {
        Ok(Some(employee)) => HttpResponse::Ok().json(employee),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Employee {id} not found"),
        })),
        Err(e) => store_error_response(e),
    }
}

/// GET /api/students — student directory (staff only).
pub async fn get_students(
    identity: AuthIdentity,
    store: web::Data<Store>,
) -> actix_web::Result<impl Responder> {
    identity.require_employee()?;
    Ok(match store.entities().students().await {
        Ok(students) => HttpResponse::Ok().json(students),
        Err(e) => store_error_response(e),
    })
}

/// GET /api/students/{id} — a single student (requires authentication).
pub async fn get_student(
    _identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();
    match store.entities().student(&id).await {
        Ok(Some(student)) => HttpResponse::Ok().json(student),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Student {id} not found"),
        })),
        Err(e) => store_error_response(e),
    }
}
