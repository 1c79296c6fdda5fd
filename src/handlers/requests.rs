use actix_web::{HttpResponse, Responder, web};

use crate::auth::middleware::AuthIdentity;
use crate::models::requests::{NewRequest, SetFeatureEstimate, UpdateRequestStatus};
use crate::store::Store;

use super::store_error_response;

/// POST /api/requests/modification — a client files a change request.
/// Answers 501 on a backend without the collaboration segment.
pub async fn create_modification(
    _identity: AuthIdentity,
    store: web::Data<Store>,
    body: web::Json<NewRequest>,
) -> impl Responder {
    let collab = match store.collab() {
        Ok(collab) => collab,
        Err(e) => return store_error_response(e),
    };
    match collab.create_modification_request(body.into_inner()).await {
        Ok(request) => HttpResponse::Created().json(request),
        Err(e) => store_error_response(e),
    }
}

/// GET /api/requests/modification/project/{project_id} — a project's
/// modification requests.
pub async fn get_modifications_by_project(
    _identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> impl Responder {
    let collab = match store.collab() {
        Ok(collab) => collab,
        Err(e) => return store_error_response(e),
    };
    match collab
        .modification_requests_by_project(&path.into_inner())
        .await
    {
        Ok(requests) => HttpResponse::Ok().json(requests),
        Err(e) => store_error_response(e),
    }
}

/// PUT /api/requests/modification/{id}/status — move a request through
/// its pipeline (staff only).
pub async fn update_modification_status(
    identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
    body: web::Json<UpdateRequestStatus>,
) -> actix_web::Result<impl Responder> {
    identity.require_employee()?;
    let collab = match store.collab() {
        Ok(collab) => collab,
        Err(e) => return Ok(store_error_response(e)),
    };
    Ok(
        match collab
            .update_modification_request_status(&path.into_inner(), body.status)
            .await
        {
            Ok(request) => HttpResponse::Ok().json(request),
            Err(e) => store_error_response(e),
        },
    )
}

/// POST /api/requests/feature — a client files a feature request.
pub async fn create_feature(
    _identity: AuthIdentity,
    store: web::Data<Store>,
    body: web::Json<NewRequest>,
) -> impl Responder {
    let collab = match store.collab() {
        Ok(collab) => collab,
        Err(e) => return store_error_response(e),
    };
    match collab.create_feature_request(body.into_inner()).await {
        Ok(request) => HttpResponse::Created().json(request),
        Err(e) => store_error_response(e),
    }
}

/// GET /api/requests/feature/project/{project_id} — a project's feature
/// requests.
pub async fn get_features_by_project(
    _identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> impl Responder {
    let collab = match store.collab() {
        Ok(collab) => collab,
        Err(e) => return store_error_response(e),
    };
    match collab.feature_requests_by_project(&path.into_inner()).await {
        Ok(requests) => HttpResponse::Ok().json(requests),
        Err(e) => store_error_response(e),
    }
}

/// PUT /api/requests/feature/{id}/status — move a feature request through
/// its pipeline (staff only).
pub async fn update_feature_status(
    identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
    body: web::Json<UpdateRequestStatus>,
) -> actix_web::Result<impl Responder> {
    identity.require_employee()?;
    let collab = match store.collab() {
        Ok(collab) => collab,
        Err(e) => return Ok(store_error_response(e)),
    };
    Ok(
        match collab
            .update_feature_request_status(&path.into_inner(), body.status)
            .await
        {
            Ok(request) => HttpResponse::Ok().json(request),
            Err(e) => store_error_response(e),
        },
    )
}

/// PUT /api/requests/feature/{id}/estimate — staff attach the cost and
/// duration estimate.
pub async fn set_feature_estimate(
    identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
    body: web::Json<SetFeatureEstimate>,
) -> actix_web::Result<impl Responder> {
    identity.require_employee()?;
    let collab = match store.collab() {
        Ok(collab) => collab,
        Err(e) => return Ok(store_error_response(e)),
    };
    Ok(
        match collab
            .set_feature_request_estimate(&path.into_inner(), body.into_inner())
            .await
        {
            Ok(request) => HttpResponse::Ok().json(request),
            Err(e) => store_error_response(e),
        },
    )
}
