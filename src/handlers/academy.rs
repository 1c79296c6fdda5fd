use actix_web::{HttpResponse, Responder, web};

use crate::auth::middleware::AuthIdentity;
use crate::models::academy::{
    NewCertificate, NewCourse, NewEnrollment, NewLessonProgress, NewQuizAttempt,
    UpdateEnrollmentProgress,
};
use crate::store::Store;

use super::store_error_response;

/// GET /api/courses — the public course catalog.
pub async fn get_courses(store: web::Data<Store>) -> impl Responder {
    match store.entities().courses().await {
        Ok(courses) => HttpResponse::Ok().json(courses),
        Err(e) => store_error_response(e),
    }
}

/// GET /api/courses/{id} — a single course.
pub async fn get_course(store: web::Data<Store>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    match store.entities().course(&id).await {
        Ok(Some(course)) => HttpResponse::Ok().json(course),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Course {id} not found"),
        })),
        Err(e) => store_error_response(e),
    }
}

/// POST /api/courses — add a course (staff only).
pub async fn create_course(
    identity: AuthIdentity,
    store: web::Data<Store>,
    body: web::Json<NewCourse>,
) -> actix_web::Result<impl Responder> {
    identity.require_employee()?;
    Ok(match store.entities().create_course(body.into_inner()).await {
        Ok(course) => HttpResponse::Created().json(course),
        Err(e) => store_error_response(e),
    })
}

/// POST /api/enrollments — enroll a student in a course.
pub async fn create_enrollment(
    _identity: AuthIdentity,
    store: web::Data<Store>,
    body: web::Json<NewEnrollment>,
) -> impl Responder {
    match store.entities().create_enrollment(body.into_inner()).await {
        Ok(enrollment) => HttpResponse::Created().json(enrollment),
        Err(e) => store_error_response(e),
    }
}

/// GET /api/enrollments/student/{student_id} — a student's enrollments.
pub async fn get_enrollments(
    _identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> impl Responder {
    match store
        .entities()
        .enrollments_by_student(&path.into_inner())
        .await
    {
        Ok(enrollments) => HttpResponse::Ok().json(enrollments),
        Err(e) => store_error_response(e),
    }
}

/// PUT /api/enrollments/{id}/progress — set the 0–100 progress integer
/// explicitly; the store never derives it.
pub async fn update_progress(
    _identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
    body: web::Json<UpdateEnrollmentProgress>,
) -> impl Responder {
    match store
        .entities()
        .update_enrollment_progress(&path.into_inner(), body.progress)
        .await
    {
        Ok(enrollment) => HttpResponse::Ok().json(enrollment),
        Err(e) => store_error_response(e),
    }
}

/// POST /api/lessons — record a completed lesson.
pub async fn record_lesson(
    _identity: AuthIdentity,
    store: web::Data<Store>,
    body: web::Json<NewLessonProgress>,
) -> impl Responder {
    match store
        .entities()
        .record_lesson_progress(body.into_inner())
        .await
    {
        Ok(record) => HttpResponse::Created().json(record),
        Err(e) => store_error_response(e),
    }
}

/// GET /api/enrollments/{id}/lessons — lesson records for an enrollment.
pub async fn get_lesson_progress(
    _identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> impl Responder {
    match store.entities().lesson_progress(&path.into_inner()).await {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => store_error_response(e),
    }
}

/// POST /api/quizzes — record a quiz attempt.
pub async fn record_quiz(
    _identity: AuthIdentity,
    store: web::Data<Store>,
    body: web::Json<NewQuizAttempt>,
) -> impl Responder {
    match store.entities().record_quiz_attempt(body.into_inner()).await {
        Ok(attempt) => HttpResponse::Created().json(attempt),
        Err(e) => store_error_response(e),
    }
}

/// GET /api/enrollments/{id}/quizzes — quiz attempts for an enrollment.
pub async fn get_quiz_attempts(
    _identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> impl Responder {
    match store.entities().quiz_attempts(&path.into_inner()).await {
        Ok(attempts) => HttpResponse::Ok().json(attempts),
        Err(e) => store_error_response(e),
    }
}

/// POST /api/certificates — issue a certificate. Requires explicit staff
/// approval; a passing quiz score alone never triggers this.
pub async fn issue_certificate(
    identity: AuthIdentity,
    store: web::Data<Store>,
    body: web::Json<NewCertificate>,
) -> actix_web::Result<impl Responder> {
    identity.require_employee()?;
    Ok(
        match store.entities().issue_certificate(body.into_inner()).await {
            Ok(certificate) => HttpResponse::Created().json(certificate),
            Err(e) => store_error_response(e),
        },
    )
}

/// GET /api/certificates/student/{student_id} — a student's certificates.
pub async fn get_certificates(
    _identity: AuthIdentity,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> impl Responder {
    match store
        .entities()
        .certificates_by_student(&path.into_inner())
        .await
    {
        Ok(certificates) => HttpResponse::Ok().json(certificates),
        Err(e) => store_error_response(e),
    }
}
