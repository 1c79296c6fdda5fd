use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;

use crate::auth::middleware::AuthIdentity;
use crate::models::catalog::{NewDiscountCode, NewService, SetServiceActive};
use crate::store::Store;

use super::store_error_response;

/// GET /api/services — the public service catalog.
pub async fn get_services(store: web::Data<Store>) -> impl Responder {
    match store.entities().services().await {
        Ok(services) => HttpResponse::Ok().json(services),
        Err(e) => store_error_response(e),
    }
}

/// GET /api/services/{id} — a single catalog item.
pub async fn get_service(store: web::Data<Store>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    match store.entities().service(&id).await {
        Ok(Some(service)) => HttpResponse::Ok().json(service),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Service {id} not found"),
        })),
        Err(e) => store_error_response(e),
    }
}

/// POST /api/services — add a catalog item (staff only).
pub async fn create_service(
    identity: AuthIdentity,
    store: web::Data<Store>,
    body: web::Json<NewService>,
) -> actix_web::Result<impl Responder> {
    identity.require_employee()?;
    Ok(match store.entities().create_service(body.into_inner()).await {
        Ok(service) => HttpResponse::Created().json(service),
        Err(e) => store_error_response(e),
    })
}

/// PUT /api/services/{id}/active — flip a catalog item's active flag (staff only).
pub async fn set_service_active(
    identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
    body: web::Json<SetServiceActive>,
) -> actix_web::Result<impl Responder> {
    identity.require_employee()?;
    Ok(
        match store
            .entities()
            .set_service_active(&path.into_inner(), body.is_active)
            .await
        {
            Ok(service) => HttpResponse::Ok().json(service),
            Err(e) => store_error_response(e),
        },
    )
}

/// GET /api/discounts — list discount codes (staff only).
pub async fn get_discount_codes(
    identity: AuthIdentity,
    store: web::Data<Store>,
) -> actix_web::Result<impl Responder> {
    identity.require_employee()?;
    Ok(match store.entities().discount_codes().await {
        Ok(codes) => HttpResponse::Ok().json(codes),
        Err(e) => store_error_response(e),
    })
}

/// POST /api/discounts — create a discount code (staff only).
pub async fn create_discount_code(
    identity: AuthIdentity,
    store: web::Data<Store>,
    body: web::Json<NewDiscountCode>,
) -> actix_web::Result<impl Responder> {
    identity.require_employee()?;
    Ok(
        match store
            .entities()
            .create_discount_code(body.into_inner())
            .await
        {
            Ok(code) => HttpResponse::Created().json(code),
            Err(e) => store_error_response(e),
        },
    )
}

/// GET /api/discounts/validate/{code} — pure time-based validity check.
/// An unknown, inactive or expired code all answer 404.
pub async fn validate_discount(
    store: web::Data<Store>,
    path: web::Path<String>,
) -> impl Responder {
    let code = path.into_inner();
    match store.entities().discount_code(&code).await {
        Ok(Some(discount)) if discount.is_valid_at(Utc::now()) => {
            HttpResponse::Ok().json(discount)
        }
        Ok(_) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Discount code {code} is not valid"),
        })),
        Err(e) => store_error_response(e),
    }
}
