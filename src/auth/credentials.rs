//! Password hashing for the three account namespaces. The hash lives in
//! the store; verification happens here at login time.

pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
}

/// A malformed stored hash verifies as false rather than erroring — a
/// login attempt should never 500 on bad stored data.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}
