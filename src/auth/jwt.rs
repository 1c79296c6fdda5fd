use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Which login namespace a token belongs to. A client token never grants
/// employee or student access — the namespaces are disjoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Client,
    Employee,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Employee => "employee",
            Self::Student => "student",
        }
    }
}

/// Tokens carry a fixed 24-hour expiry with no sliding renewal.
const TOKEN_TTL_SECS: usize = 24 * 60 * 60;

/// JWT claims issued at login.
///
/// The `sub` field is the account's opaque store id; `role` names the
/// namespace the account was authenticated against.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The account's store id.
    pub sub: String,
    /// Token expiration (Unix timestamp).
    pub exp: usize,
    /// Token issued-at (Unix timestamp).
    pub iat: usize,
    /// The login namespace this token authenticates.
    pub role: Role,
    /// Email the account logged in with.
    pub email: String,
}

/// Mint an HS256 token for a freshly authenticated account.
pub fn issue_token(
    account_id: &str,
    email: &str,
    role: Role,
    secret: &str,
) -> Result<String, String> {
    let now = Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: account_id.to_string(),
        exp: now + TOKEN_TTL_SECS,
        iat: now,
        role,
        email: email.to_string(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("Failed to encode token: {e}"))
}

/// Validate an HS256 token and return the decoded claims.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, String> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| format!("{e:?}"))
}
