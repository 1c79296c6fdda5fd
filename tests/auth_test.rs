//! Tests for JWT issue/validation.
//!
//! Tokens are minted and validated locally with the same HS256 secret
//! the server would use. No running server or database is needed.
//!
//! Run with: `cargo test --test auth_test`
use agencyhub_backend::auth::credentials::{hash_password, verify_password};
use agencyhub_backend::auth::jwt::{Role, issue_token, validate_token};

/// A fake secret for testing — never use the real one in tests committed to git.
const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

#[test]
fn test_valid_token_round_trips() {
    let token = issue_token("client-1", "alice@example.com", Role::Client, TEST_SECRET)
        .expect("Token should be issued");

    let claims = validate_token(&token, TEST_SECRET).expect("Token should be valid");

    assert_eq!(claims.sub, "client-1");
    assert_eq!(claims.email, "alice@example.com");
    assert_eq!(claims.role, Role::Client);
    // Fixed 24-hour expiry, no sliding renewal.
    assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
}

#[test]
fn test_wrong_secret_is_rejected() {
    let token = issue_token("student-1", "bob@example.com", Role::Student, TEST_SECRET)
        .expect("Token should be issued");

    let result = validate_token(&token, "completely-wrong-secret-xxxxxxxxxxxxxxxxxxx");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("InvalidSignature"));
}

#[test]
fn test_garbage_token_is_rejected() {
    let result = validate_token("not.a.valid.jwt", TEST_SECRET);
    assert!(result.is_err());
}

#[test]
fn test_roles_survive_the_round_trip() {
    for role in [Role::Client, Role::Employee, Role::Student] {
        let token =
            issue_token("acct", "roles@example.com", role, TEST_SECRET).expect("issue failed");
        let claims = validate_token(&token, TEST_SECRET).expect("validate failed");
        assert_eq!(claims.role, role);
    }
}

#[test]
fn test_password_hash_verifies() {
    let hash = hash_password("hunter2").expect("hash failed");
    assert!(verify_password("hunter2", &hash));
    assert!(!verify_password("hunter3", &hash));
    // Malformed stored hashes fail closed instead of erroring.
    assert!(!verify_password("hunter2", "not-a-bcrypt-hash"));
}
