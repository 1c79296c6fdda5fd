pub mod academy;
pub mod accounts;
pub mod auth;
pub mod catalog;
pub mod chat;
pub mod orders;
pub mod projects;
pub mod reports;
pub mod requests;

use actix_web::HttpResponse;
use actix_web::web;

use crate::store::StoreError;

/// Map a store error to the HTTP contract: absence → 404, namespace
/// conflicts → 409, capability gaps → 501, everything else → 500.
pub(crate) fn store_error_response(e: StoreError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        StoreError::NotFound { .. } => HttpResponse::NotFound().json(body),
        StoreError::Conflict { .. } => HttpResponse::Conflict().json(body),
        StoreError::Unsupported { .. } => HttpResponse::NotImplemented().json(body),
        StoreError::Database(_) | StoreError::Document(_) => {
            tracing::error!("Store failure: {e}");
            HttpResponse::InternalServerError().json(body)
        }
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth routes (register/login per namespace, token introspection) ──
    cfg.service(
        web::scope("/auth")
            .route("/client/register", web::post().to(auth::register_client))
            .route("/client/login", web::post().to(auth::login_client))
            .route("/employee/register", web::post().to(auth::register_employee))
            .route("/employee/login", web::post().to(auth::login_employee))
            .route("/student/register", web::post().to(auth::register_student))
            .route("/student/login", web::post().to(auth::login_student))
            .route("/me", web::get().to(auth::me)),
    );

    // ── Catalog routes (public reads, staff writes) ──
    cfg.service(
        web::scope("/services")
            .route("", web::get().to(catalog::get_services))
            .route("", web::post().to(catalog::create_service))
            .route("/{id}", web::get().to(catalog::get_service))
            .route("/{id}/active", web::put().to(catalog::set_service_active)),
    );
    cfg.service(
        web::scope("/discounts")
            .route("", web::get().to(catalog::get_discount_codes))
            .route("", web::post().to(catalog::create_discount_code))
            .route("/validate/{code}", web::get().to(catalog::validate_discount)),
    );

    // ── Order routes (guest checkout allowed on create) ──
    cfg.service(
        web::scope("/orders")
            .route("", web::get().to(orders::get_orders))
            .route("", web::post().to(orders::create_order))
            .route("/number/{number}", web::get().to(orders::get_order_by_number))
            .route("/client/{client_id}", web::get().to(orders::get_orders_by_client))
            .route("/{id}", web::get().to(orders::get_order))
            .route("/{id}/status", web::put().to(orders::update_status))
            .route("/{id}/payment", web::put().to(orders::update_payment)),
    );
    cfg.service(
        web::scope("/invoices")
            .route("", web::get().to(orders::get_invoices))
            .route("/{id}", web::get().to(orders::get_invoice)),
    );

    // ── Account routes (staff directory views) ──
    cfg.service(
        web::scope("/clients")
            .route("", web::get().to(accounts::get_clients))
            .route("/{id}", web::get().to(accounts::get_client)),
    );
    cfg.service(
        web::scope("/employees")
            .route("", web::get().to(accounts::get_employees))
            .route("/{id}", web::get().to(accounts::get_employee)),
    );
    cfg.service(
        web::scope("/students")
            .route("", web::get().to(accounts::get_students))
            .route("/{id}", web::get().to(accounts::get_student)),
    );

    // ── Project & task routes ──
    cfg.service(
        web::scope("/projects")
            .route("", web::get().to(projects::get_projects))
            .route("", web::post().to(projects::create_project))
            .route("/client/{client_id}", web::get().to(projects::get_projects_by_client))
            .route("/{id}", web::get().to(projects::get_project))
            .route("/{id}/status", web::put().to(projects::update_status))
            .route("/{id}/days", web::put().to(projects::update_days))
            .route("/{id}/tasks", web::get().to(projects::get_tasks_by_project)),
    );
    cfg.service(
        web::scope("/tasks")
            .route("", web::post().to(projects::create_task))
            .route("/employee/{employee_id}", web::get().to(projects::get_tasks_by_employee))
            .route("/{id}/progress", web::put().to(projects::update_task_progress)),
    );

    // ── Change-request routes (relational/in-memory backends only) ──
    cfg.service(
        web::scope("/requests")
            .route("/modification", web::post().to(requests::create_modification))
            .route(
                "/modification/project/{project_id}",
                web::get().to(requests::get_modifications_by_project),
            )
            .route(
                "/modification/{id}/status",
                web::put().to(requests::update_modification_status),
            )
            .route("/feature", web::post().to(requests::create_feature))
            .route(
                "/feature/project/{project_id}",
                web::get().to(requests::get_features_by_project),
            )
            .route("/feature/{id}/status", web::put().to(requests::update_feature_status))
            .route("/feature/{id}/estimate", web::put().to(requests::set_feature_estimate)),
    );

    // ── Chat routes (relational/in-memory backends only) ──
    cfg.service(
        web::scope("/chat")
            .route("/conversations", web::post().to(chat::open_conversation))
            .route("/conversations/client/{client_id}", web::get().to(chat::get_conversations))
            .route("/conversations/{id}", web::get().to(chat::get_conversation))
            .route("/conversations/{id}/messages", web::get().to(chat::get_messages))
            .route("/conversations/{id}/read", web::post().to(chat::mark_read))
            .route("/messages", web::post().to(chat::create_message)),
    );

    // ── Academy routes ──
    cfg.service(
        web::scope("/courses")
            .route("", web::get().to(academy::get_courses))
            .route("", web::post().to(academy::create_course))
            .route("/{id}", web::get().to(academy::get_course)),
    );
    cfg.service(
        web::scope("/enrollments")
            .route("", web::post().to(academy::create_enrollment))
            .route("/student/{student_id}", web::get().to(academy::get_enrollments))
            .route("/{id}/progress", web::put().to(academy::update_progress))
            .route("/{id}/lessons", web::get().to(academy::get_lesson_progress))
            .route("/{id}/quizzes", web::get().to(academy::get_quiz_attempts)),
    );
    cfg.service(
        web::scope("/lessons").route("", web::post().to(academy::record_lesson)),
    );
    cfg.service(
        web::scope("/quizzes").route("", web::post().to(academy::record_quiz)),
    );
    cfg.service(
        web::scope("/certificates")
            .route("", web::post().to(academy::issue_certificate))
            .route("/student/{student_id}", web::get().to(academy::get_certificates)),
    );

    // ── Reporting routes ──
    cfg.service(
        web::scope("/reports")
            .route("/dashboard", web::get().to(reports::dashboard))
            .route("/monthly", web::get().to(reports::monthly))
            .route("/financial", web::get().to(reports::financial))
            .route("/productivity", web::get().to(reports::productivity))
            .route("/unbilled", web::get().to(reports::unbilled)),
    );
}
