//! bcrypt password hashing.
//!
//! Stored hashes are standard `$2b$<cost>$...` strings, so the cost travels
//! with the hash and can be raised without invalidating older accounts.

use crate::error::{AuthError, Result};

/// Work factor used when none is configured.
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

/// Smallest work factor bcrypt accepts.
pub const MIN_COST: u32 = 4;

/// Largest work factor bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// Hash a password at the default cost.
pub fn hash_password(password: &str) -> Result<String> {
    hash_password_with_cost(password, DEFAULT_COST)
}

/// Hash a password with a fresh random salt at the given cost.
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String> {
    bcrypt::hash(password, cost).map_err(|e| AuthError::PasswordHash(e.to_string()).into())
}

/// Check a password against a stored hash.
///
/// Malformed stored values never verify.
pub fn verify_password(password: &str, stored: &str) -> bool {
    match bcrypt::verify(password, stored) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::warn!("Unverifiable password hash: {}", e);
            false
        }
    }
}
