use actix_web::FromRequest;
use actix_web::{Error, HttpRequest, dev::Payload, web};
use std::future::Future;
use std::pin::Pin;

use crate::auth::jwt::{self, Role};

/// The authenticated principal attached to a request: store id, email
/// and the namespace the token was issued for. No database lookup — the
/// token is the source of truth for the request's identity.
pub struct AuthIdentity {
    pub account_id: String,
    pub email: String,
    pub role: Role,
}

impl AuthIdentity {
    /// Guard for staff-only operations (estimates, certificates, task
    /// assignment).
    pub fn require_employee(&self) -> Result<(), Error> {
        if self.role == Role::Employee {
            Ok(())
        } else {
            Err(actix_web::error::ErrorForbidden(
                "This operation requires an employee account",
            ))
        }
    }
}

impl FromRequest for AuthIdentity {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // 1. Extract the Bearer token from the Authorization header.
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| {
                    actix_web::error::ErrorUnauthorized("Missing Authorization header")
                })?;

            let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
                actix_web::error::ErrorUnauthorized("Authorization header must be: Bearer <token>")
            })?;

            // 2. Get the signing secret from app data.
            let secret = req.app_data::<web::Data<JwtSecret>>().ok_or_else(|| {
                actix_web::error::ErrorInternalServerError("JWT secret not configured")
            })?;

            // 3. Validate and unpack the claims.
            let claims = jwt::validate_token(token, &secret.0)
                .map_err(|e| actix_web::error::ErrorUnauthorized(format!("Invalid token: {e}")))?;

            Ok(AuthIdentity {
                account_id: claims.sub,
                email: claims.email,
                role: claims.role,
            })
        })
    }
}

/// Wrapper type to store the JWT secret in Actix app data.
#[derive(Clone)]
pub struct JwtSecret(pub String);
