//! Credentials
//!
//! Password policy, bcrypt password hashing and bearer token generation.
//! Tokens are only ever stored as SHA-256 hex digests.

use rand::RngCore;
use sha2::{Digest, Sha256};

use super::error::DomainError;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Minimum username length
pub const MIN_USERNAME_LENGTH: usize = 4;

const TOKEN_BYTES: usize = 32;

// =========================================================================
// Validation
// =========================================================================

/// Check the password policy: length, an uppercase letter and a digit
pub fn validate_password(password: &str) -> Result<(), DomainError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(DomainError::Validation(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        )));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(DomainError::Validation(
            "Password must contain at least one uppercase letter".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(DomainError::Validation(
            "Password must contain at least one number".to_string(),
        ));
    }
    Ok(())
}

/// Check username length and allowed characters `[A-Za-z0-9_.-]`
pub fn validate_username(username: &str) -> Result<(), DomainError> {
    if username.chars().count() < MIN_USERNAME_LENGTH {
        return Err(DomainError::Validation(format!(
            "username is shorter than the minimum allowed length ({})",
            MIN_USERNAME_LENGTH
        )));
    }
    let valid = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
    if !valid {
        return Err(DomainError::Validation(
            "Username contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

// =========================================================================
// Password hashing
// =========================================================================

/// bcrypt work factor used when none is configured
pub const DEFAULT_PASSWORD_COST: u32 = 10;

/// Smallest work factor bcrypt accepts
pub const MIN_PASSWORD_COST: u32 = 4;

/// Largest work factor bcrypt accepts
pub const MAX_PASSWORD_COST: u32 = 31;

/// Hash a password with bcrypt at the given work factor
pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, cost)
}

/// Check a password against a stored bcrypt hash. Malformed hashes never match.
pub fn verify_password(password: &str, stored: &str) -> bool {
    bcrypt::verify(password, stored).unwrap_or(false)
}

// =========================================================================
// Tokens
// =========================================================================

/// Generate a new opaque bearer token
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Digest under which a token is stored and looked up
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
