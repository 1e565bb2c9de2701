//! Password hashing utilities
//!
//! bcrypt only reads the first 72 bytes of its NUL-terminated input. The
//! non-truncating variants refuse longer passwords instead of silently
//! ignoring the tail.

use bcrypt::{non_truncating_hash, non_truncating_verify, BcryptError};

pub use bcrypt::DEFAULT_COST;

/// Cheapest cost bcrypt accepts
pub const MIN_COST: u32 = 4;

/// Most expensive cost bcrypt accepts
pub const MAX_COST: u32 = 31;

/// Longest password bcrypt can hash without truncation (72 minus the NUL)
pub const MAX_PASSWORD_BYTES: usize = 71;

/// Hash a password using bcrypt with a random salt
pub fn hash_password(password: &str, cost: u32) -> Result<String, BcryptError> {
    non_truncating_hash(password, cost)
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, BcryptError> {
    non_truncating_verify(password, hash)
}
