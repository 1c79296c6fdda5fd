use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;

use crate::auth::middleware::AuthIdentity;
use crate::cache::StatsCache;
use crate::reports;
use crate::store::Store;

use super::store_error_response;

/// GET /api/reports/dashboard — the dashboard counters, cached with a
/// short TTL (staff only).
pub async fn dashboard(
    identity: AuthIdentity,
    store: web::Data<Store>,
    cache: web::Data<StatsCache>,
) -> actix_web::Result<impl Responder> {
    identity.require_employee()?;

    if let Some(stats) = cache.dashboard().await {
        return Ok(HttpResponse::Ok().json(stats));
    }
    Ok(match store.entities().dashboard_stats().await {
        Ok(stats) => {
            cache.store_dashboard(stats.clone()).await;
            HttpResponse::Ok().json(stats)
        }
        Err(e) => store_error_response(e),
    })
}

/// GET /api/reports/monthly — revenue, order volume and client growth
/// over the trailing six calendar months (staff only).
pub async fn monthly(
    identity: AuthIdentity,
    store: web::Data<Store>,
) -> actix_web::Result<impl Responder> {
    identity.require_employee()?;

    let orders = match store.entities().orders().await {
        Ok(orders) => orders,
        Err(e) => return Ok(store_error_response(e)),
    };
    let clients = match store.entities().clients().await {
        Ok(clients) => clients,
        Err(e) => return Ok(store_error_response(e)),
    };
    Ok(HttpResponse::Ok().json(reports::monthly_series(&orders, &clients, Utc::now())))
}

/// GET /api/reports/financial — paid/outstanding revenue, the 30-day
/// trend and the top services (staff only).
pub async fn financial(
    identity: AuthIdentity,
    store: web::Data<Store>,
) -> actix_web::Result<impl Responder> {
    identity.require_employee()?;

    Ok(match store.entities().orders().await {
        Ok(orders) => HttpResponse::Ok().json(reports::financial_report(&orders, Utc::now())),
        Err(e) => store_error_response(e),
    })
}

/// GET /api/reports/productivity — per-employee task completion and
/// remaining workload (staff only).
pub async fn productivity(
    identity: AuthIdentity,
    store: web::Data<Store>,
) -> actix_web::Result<impl Responder> {
    identity.require_employee()?;

    Ok(match store.entities().all_tasks().await {
        Ok(tasks) => HttpResponse::Ok().json(reports::productivity_report(&tasks)),
        Err(e) => store_error_response(e),
    })
}

/// GET /api/reports/unbilled — reconciliation: paid orders that have no
/// invoice (staff only). Non-empty output means the two-step payment
/// write was interrupted somewhere.
pub async fn unbilled(
    identity: AuthIdentity,
    store: web::Data<Store>,
) -> actix_web::Result<impl Responder> {
    identity.require_employee()?;

    Ok(match store.entities().unbilled_paid_orders().await {
        Ok(orders) => HttpResponse::Ok().json(orders),
        Err(e) => store_error_response(e),
    })
}
