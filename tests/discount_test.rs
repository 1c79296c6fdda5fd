//! Tests for discount-code validity: a pure function of the clock.
//!
//! Run with: `cargo test --test discount_test`
use chrono::{Duration, Utc};

use agencyhub_backend::models::catalog::DiscountCode;

fn code(is_active: bool, expires_at: Option<chrono::DateTime<Utc>>) -> DiscountCode {
    DiscountCode {
        id: "discount-1".to_string(),
        code: "WELCOME10".to_string(),
        percent_off: 10,
        is_active,
        expires_at,
        created_at: Utc::now() - Duration::days(30),
    }
}

#[test]
fn test_inactive_code_is_invalid() {
    let now = Utc::now();
    assert!(!code(false, None).is_valid_at(now));
}

#[test]
fn test_expired_code_is_invalid() {
    let now = Utc::now();
    assert!(!code(true, Some(now - Duration::days(1))).is_valid_at(now));
}

#[test]
fn test_active_code_without_expiry_is_valid() {
    let now = Utc::now();
    assert!(code(true, None).is_valid_at(now));
}

#[test]
fn test_active_code_with_future_expiry_is_valid() {
    let now = Utc::now();
    assert!(code(true, Some(now + Duration::days(1))).is_valid_at(now));
}

#[test]
fn test_inactive_overrides_future_expiry() {
    let now = Utc::now();
    assert!(!code(false, Some(now + Duration::days(1))).is_valid_at(now));
}
