use actix_web::{HttpResponse, Responder, web};

use crate::auth::credentials;
use crate::auth::jwt::{self, Role};
use crate::auth::middleware::{AuthIdentity, JwtSecret};
use crate::models::accounts::{Login, NewClient, NewEmployee, NewStudent, Register};
use crate::store::Store;

use super::store_error_response;

fn token_response(
    secret: &JwtSecret,
    account_id: &str,
    email: &str,
    role: Role,
    account: impl serde::Serialize,
) -> HttpResponse {
    match jwt::issue_token(account_id, email, role, &secret.0) {
        Ok(token) => HttpResponse::Ok().json(serde_json::json!({
            "token": token,
            "role": role.as_str(),
            "account": account,
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": e,
        })),
    }
}

fn invalid_credentials() -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({
        "error": "Invalid email or password",
    }))
}

/// POST /api/auth/client/register — create a client account and log in.
pub async fn register_client(
    store: web::Data<Store>,
    secret: web::Data<JwtSecret>,
    body: web::Json<Register>,
) -> impl Responder {
    let input = body.into_inner();
    let password_hash = match credentials::hash_password(&input.password) {
        Ok(hash) => hash,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to hash password: {e}"),
            }));
        }
    };
    let new_client = NewClient {
        name: input.name,
        email: input.email,
        password_hash,
        company: input.company,
        phone: input.phone,
    };
    match store.entities().create_client(new_client).await {
        Ok(client) => {
            token_response(&secret, &client.id, &client.email, Role::Client, &client)
        }
        Err(e) => store_error_response(e),
    }
}

/// POST /api/auth/client/login — verify credentials in the client namespace.
pub async fn login_client(
    store: web::Data<Store>,
    secret: web::Data<JwtSecret>,
    body: web::Json<Login>,
) -> impl Responder {
    match store.entities().client_by_email(&body.email).await {
        Ok(Some(client)) if credentials::verify_password(&body.password, &client.password_hash) => {
            token_response(&secret, &client.id, &client.email, Role::Client, &client)
        }
        Ok(_) => invalid_credentials(),
        Err(e) => store_error_response(e),
    }
}

/// POST /api/auth/employee/register — create a staff account and log in.
pub async fn register_employee(
    store: web::Data<Store>,
    secret: web::Data<JwtSecret>,
    body: web::Json<Register>,
) -> impl Responder {
    let input = body.into_inner();
    let password_hash = match credentials::hash_password(&input.password) {
        Ok(hash) => hash,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to hash password: {e}"),
            }));
        }
    };
    let new_employee = NewEmployee {
        name: input.name,
        email: input.email,
        password_hash,
        job_title: input.job_title,
    };
    match store.entities().create_employee(new_employee).await {
        Ok(employee) => token_response(
            &secret,
            &employee.id,
            &employee.email,
            Role::Employee,
            &employee,
        ),
        Err(e) => store_error_response(e),
    }
}

/// POST /api/auth/employee/login — verify credentials in the employee namespace.
pub async fn login_employee(
    store: web::Data<Store>,
    secret: web::Data<JwtSecret>,
    body: web::Json<Login>,
) -> impl Responder {
    match store.entities().employee_by_email(&body.email).await {
        Ok(Some(employee))
            if credentials::verify_password(&body.password, &employee.password_hash) =>
        {
            token_response(
                &secret,
                &employee.id,
                &employee.email,
                Role::Employee,
                &employee,
            )
        }
        Ok(_) => invalid_credentials(),
        Err(e) => store_error_response(e),
    }
}

/// POST /api/auth/student/register — create a student account and log in.
pub async fn register_student(
    store: web::Data<Store>,
    secret: web::Data<JwtSecret>,
    body: web::Json<Register>,
) -> impl Responder {
    let input = body.into_inner();
    let password_hash = match credentials::hash_password(&input.password) {
        Ok(hash) => hash,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to hash password: {e}"),
            }));
        }
    };
    let new_student = NewStudent {
        name: input.name,
        email: input.email,
        password_hash,
        phone: input.phone,
    };
    match store.entities().create_student(new_student).await {
        Ok(student) => {
            token_response(&secret, &student.id, &student.email, Role::Student, &student)
        }
        Err(e) => store_error_response(e),
    }
}

/// POST /api/auth/student/login — verify credentials in the student namespace.
pub async fn login_student(
    store: web::Data<Store>,
    secret: web::Data<JwtSecret>,
    body: web::Json<Login>,
) -> impl Responder {
    match store.entities().student_by_email(&body.email).await {
        Ok(Some(student))
            if credentials::verify_password(&body.password, &student.password_hash) =>
        {
            token_response(&secret, &student.id, &student.email, Role::Student, &student)
        }
        Ok(_) => invalid_credentials(),
        Err(e) => store_error_response(e),
    }
}

/// GET /api/auth/me — echo the authenticated principal from the token.
pub async fn me(identity: AuthIdentity) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "account_id": identity.account_id,
        "email": identity.email,
        "role": identity.role.as_str(),
    }))
}
