use actix_web::{HttpResponse, Responder, web};

use crate::auth::middleware::AuthIdentity;
use crate::models::projects::{
    NewEmployeeTask, NewProject, UpdateProjectDays, UpdateProjectStatus, UpdateTaskProgress,
};
use crate::store::Store;

use super::store_error_response;

/// POST /api/projects — open a delivery project (staff only).
pub async fn create_project(
    identity: AuthIdentity,
    store: web::Data<Store>,
    body: web::Json<NewProject>,
) -> actix_web::Result<impl Responder> {
    identity.require_employee()?;
    Ok(match store.entities().create_project(body.into_inner()).await {
        Ok(project) => HttpResponse::Created().json(project),
        Err(e) => store_error_response(e),
    })
}

/// GET /api/projects — list all projects (staff only).
pub async fn get_projects(
    identity: AuthIdentity,
    store: web::Data<Store>,
) -> actix_web::Result<impl Responder> {
    identity.require_employee()?;
    Ok(match store.entities().projects().await {
        Ok(projects) => HttpResponse::Ok().json(projects),
        Err(e) => store_error_response(e),
    })
}

/// GET /api/projects/{id} — a single project (requires authentication).
pub async fn get_project(
    _identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();
    match store.entities().project(&id).await {
        Ok(Some(project)) => HttpResponse::Ok().json(project),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Project {id} not found"),
        })),
        Err(e) => store_error_response(e),
    }
}

/// GET /api/projects/client/{client_id} — a client's projects.
pub async fn get_projects_by_client(
    _identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> impl Responder {
    match store
        .entities()
        .projects_by_client(&path.into_inner())
        .await
    {
        Ok(projects) => HttpResponse::Ok().json(projects),
        Err(e) => store_error_response(e),
    }
}

/// PUT /api/projects/{id}/status — move the project along its pipeline
/// (staff only).
pub async fn update_status(
    identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
    body: web::Json<UpdateProjectStatus>,
) -> actix_web::Result<impl Responder> {
    identity.require_employee()?;
    Ok(
        match store
            .entities()
            .update_project_status(&path.into_inner(), body.status)
            .await
        {
            Ok(project) => HttpResponse::Ok().json(project),
            Err(e) => store_error_response(e),
        },
    )
}

/// PUT /api/projects/{id}/days — set the externally maintained
/// days-remaining counter (staff only).
pub async fn update_days(
    identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
    body: web::Json<UpdateProjectDays>,
) -> actix_web::Result<impl Responder> {
    identity.require_employee()?;
    Ok(
        match store
            .entities()
            .update_project_days(&path.into_inner(), body.days_remaining)
            .await
        {
            Ok(project) => HttpResponse::Ok().json(project),
            Err(e) => store_error_response(e),
        },
    )
}

/// GET /api/projects/{id}/tasks — tasks on a project.
pub async fn get_tasks_by_project(
    _identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> impl Responder {
    match store.entities().tasks_by_project(&path.into_inner()).await {
        Ok(tasks) => HttpResponse::Ok().json(tasks),
        Err(e) => store_error_response(e),
    }
}

/// POST /api/tasks — assign a task to an employee (staff only).
pub async fn create_task(
    identity: AuthIdentity,
    store: web::Data<Store>,
    body: web::Json<NewEmployeeTask>,
) -> actix_web::Result<impl Responder> {
    identity.require_employee()?;
    Ok(match store.entities().create_task(body.into_inner()).await {
        Ok(task) => HttpResponse::Created().json(task),
        Err(e) => store_error_response(e),
    })
}

/// GET /api/tasks/employee/{employee_id} — an employee's workload.
pub async fn get_tasks_by_employee(
    _identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> impl Responder {
    match store
        .entities()
        .tasks_by_employee(&path.into_inner())
        .await
    {
        Ok(tasks) => HttpResponse::Ok().json(tasks),
        Err(e) => store_error_response(e),
    }
}

/// PUT /api/tasks/{id}/progress — update hours and/or completion
/// independently (staff only).
pub async fn update_task_progress(
    identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
    body: web::Json<UpdateTaskProgress>,
) -> actix_web::Result<impl Responder> {
    identity.require_employee()?;
    Ok(
        match store
            .entities()
            .update_task_progress(&path.into_inner(), body.into_inner())
            .await
        {
            Ok(task) => HttpResponse::Ok().json(task),
            Err(e) => store_error_response(e),
        },
    )
}
