use actix_web::{HttpResponse, Responder, web};

use crate::auth::middleware::AuthIdentity;
use crate::models::orders::{NewOrder, UpdateOrderPayment, UpdateOrderStatus};
use crate::notify::Notifier;
use crate::store::Store;

use super::store_error_response;

/// POST /api/orders — guest checkout: create an order, then send the
/// confirmation notification (best-effort).
pub async fn create_order(
    store: web::Data<Store>,
    notifier: web::Data<Notifier>,
    body: web::Json<NewOrder>,
) -> impl Responder {
    match store.entities().create_order(body.into_inner()).await {
        Ok(order) => {
            notifier.order_created(&order).await;
            HttpResponse::Created().json(order)
        }
        Err(e) => store_error_response(e),
    }
}

/// GET /api/orders — list all orders (staff only).
pub async fn get_orders(
    identity: AuthIdentity,
    store: web::Data<Store>,
) -> actix_web::Result<impl Responder> {
    identity.require_employee()?;
    Ok(match store.entities().orders().await {
        Ok(orders) => HttpResponse::Ok().json(orders),
        Err(e) => store_error_response(e),
    })
}

/// GET /api/orders/{id} — a single order (requires authentication).
pub async fn get_order(
    _identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();
    match store.entities().order(&id).await {
        Ok(Some(order)) => HttpResponse::Ok().json(order),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Order {id} not found"),
        })),
        Err(e) => store_error_response(e),
    }
}

/// GET /api/orders/number/{number} — natural-key lookup by order number.
pub async fn get_order_by_number(
    _identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> impl Responder {
    let number = path.into_inner();
    match store.entities().order_by_number(&number).await {
        Ok(Some(order)) => HttpResponse::Ok().json(order),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Order {number} not found"),
        })),
        Err(e) => store_error_response(e),
    }
}

/// GET /api/orders/client/{client_id} — a client's order history, matched
/// through the denormalized customer email.
pub async fn get_orders_by_client(
    _identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> impl Responder {
    match store.entities().orders_by_client(&path.into_inner()).await {
        Ok(orders) => HttpResponse::Ok().json(orders),
        Err(e) => store_error_response(e),
    }
}

/// PUT /api/orders/{id}/status — advance the delivery status (staff only).
pub async fn update_status(
    identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
    body: web::Json<UpdateOrderStatus>,
) -> actix_web::Result<impl Responder> {
    identity.require_employee()?;
    Ok(
        match store
            .entities()
            .update_order_status(&path.into_inner(), body.status)
            .await
        {
            Ok(order) => HttpResponse::Ok().json(order),
            Err(e) => store_error_response(e),
        },
    )
}

/// PUT /api/orders/{id}/payment — update the payment fields. A transition
/// to completed issues the invoice in the same store write; the paid
/// notification afterwards is best-effort.
pub async fn update_payment(
    identity: AuthIdentity,
    store: web::Data<Store>,
    notifier: web::Data<Notifier>,
    path: web::Path<String>,
    body: web::Json<UpdateOrderPayment>,
) -> actix_web::Result<impl Responder> {
    identity.require_employee()?;
    let input = body.into_inner();
    Ok(
        match store
            .entities()
            .update_order_payment(&path.into_inner(), input.payment_status, input.payment_method)
            .await
        {
            Ok(update) => {
                if let Some(invoice) = &update.invoice {
                    notifier.order_paid(&update.order, Some(invoice)).await;
                }
                HttpResponse::Ok().json(update)
            }
            Err(e) => store_error_response(e),
        },
    )
}

/// GET /api/invoices — list issued invoices (staff only).
pub async fn get_invoices(
    identity: AuthIdentity,
    store: web::Data<Store>,
) -> actix_web::Result<impl Responder> {
    identity.require_employee()?;
    Ok(match store.entities().invoices().await {
        Ok(invoices) => HttpResponse::Ok().json(invoices),
        Err(e) => store_error_response(e),
    })
}

/// GET /api/invoices/{id} — a single invoice (requires authentication).
pub async fn get_invoice(
    _identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();
    match store.entities().invoice(&id).await {
        Ok(Some(invoice)) => HttpResponse::Ok().json(invoice),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Invoice {id} not found"),
        })),
        Err(e) => store_error_response(e),
    }
}
