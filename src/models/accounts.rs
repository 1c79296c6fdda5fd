use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A client account. Emails are unique within the clients namespace only —
/// the same address may also exist as an employee or student login.
#[derive(Debug, Clone, Serialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A staff account.
#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub job_title: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A student account for the course side of the platform.
#[derive(Debug, Clone, Serialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ── DTOs ──

/// Registration payload shared by all three account namespaces.
/// The handler hashes `password` before it reaches the store.
#[derive(Debug, Clone, Deserialize)]
pub struct Register {
    pub name: String,
    pub email: String,
    pub password: String,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Login {
    pub email: String,
    pub password: String,
}

/// Store-level create input for a client (password already hashed).
#[derive(Debug, Clone)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub company: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub job_title: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
}
