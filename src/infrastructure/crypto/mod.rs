//! Credential cryptography: password hashing and signed identity tokens

pub mod jwt;
pub mod password;

pub use jwt::{create_token, verify_token, JwtConfig, TokenClaims, TokenError};
pub use password::{hash_password, verify_password};
