//! JWT Token handling

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::UserRole;

/// Default `iss` claim for tokens issued by this service
pub const DEFAULT_ISSUER: &str = "rainfall-service";

/// JWT configuration
///
/// The secret is always supplied by the caller; there is no built-in fallback.
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: i64,
    /// Issuer claim
    pub issuer: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
            issuer: DEFAULT_ISSUER.to_string(),
        }
    }

    /// Token lifetime in seconds
    pub fn expires_in(&self) -> i64 {
        self.expiration_hours * 3600
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .field("issuer", &self.issuer)
            .finish()
    }
}

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Username
    pub username: String,
    /// User role
    pub role: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

impl TokenClaims {
    pub fn new_at(
        user_id: i32,
        username: &str,
        role: UserRole,
        config: &JwtConfig,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let exp = issued_at + Duration::hours(config.expiration_hours);

        Self {
            sub: user_id.to_string(),
            username: username.to_string(),
            role: role.as_str().to_string(),
            exp: exp.timestamp(),
            iat: issued_at.timestamp(),
            iss: config.issuer.clone(),
        }
    }

    /// Expired once `now` reaches `exp`; the validity window is `[iat, exp)`.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }

    pub fn user_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }

    pub fn user_role(&self) -> Option<UserRole> {
        self.role.parse().ok()
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid authentication token")]
    Invalid,

    #[error("Token has expired")]
    Expired,

    #[error("Failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),
}

/// Create a JWT token for a user, issued now
pub fn create_token(
    user_id: i32,
    username: &str,
    role: UserRole,
    config: &JwtConfig,
) -> Result<String, TokenError> {
    create_token_at(user_id, username, role, config, Utc::now())
}

pub fn create_token_at(
    user_id: i32,
    username: &str,
    role: UserRole,
    config: &JwtConfig,
    issued_at: DateTime<Utc>,
) -> Result<String, TokenError> {
    let claims = TokenClaims::new_at(user_id, username, role, config, issued_at);

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(TokenError::Signing)
}

/// Verify and decode a JWT token against the current time
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<TokenClaims, TokenError> {
    verify_token_at(token, config, Utc::now())
}

pub fn verify_token_at(
    token: &str,
    config: &JwtConfig,
    now: DateTime<Utc>,
) -> Result<TokenClaims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);
    // Expiry is checked below against `now` with no leeway.
    validation.validate_exp = false;
    validation.leeway = 0;

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        debug!(error = %e, "Token rejected");
        TokenError::Invalid
    })?;

    if token_data.claims.is_expired_at(now.timestamp()) {
        return Err(TokenError::Expired);
    }

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config() -> JwtConfig {
        JwtConfig::new("test-secret", 1)
    }

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_create_and_verify_token() {
        let config = config();
        let token = create_token(7, "alice", UserRole::Admin, &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.user_id(), Some(7));
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.user_role(), Some(UserRole::Admin));
        assert_eq!(claims.iss, DEFAULT_ISSUER);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_token_valid_within_the_hour() {
        let config = config();
        let t = issued_at();
        let token = create_token_at(1, "bob", UserRole::User, &config, t).unwrap();

        assert!(verify_token_at(&token, &config, t).is_ok());
        assert!(verify_token_at(&token, &config, t + Duration::minutes(30)).is_ok());
        assert!(verify_token_at(&token, &config, t + Duration::seconds(3599)).is_ok());
    }

    #[test]
    fn test_token_rejected_at_and_after_expiry() {
        let config = config();
        let t = issued_at();
        let token = create_token_at(1, "bob", UserRole::User, &config, t).unwrap();

        assert!(matches!(
            verify_token_at(&token, &config, t + Duration::hours(1)),
            Err(TokenError::Expired)
        ));
        assert!(matches!(
            verify_token_at(&token, &config, t + Duration::days(2)),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_invalid_token() {
        let result = verify_token("invalid-token", &config());
        assert!(matches!(result, Err(TokenError::Invalid)));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = create_token(1, "bob", UserRole::User, &config()).unwrap();
        let other = JwtConfig::new("another-secret", 1);
        assert!(matches!(verify_token(&token, &other), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_wrong_issuer_is_rejected() {
        let mut foreign = config();
        foreign.issuer = "someone-else".to_string();
        let token = create_token(1, "bob", UserRole::User, &foreign).unwrap();
        assert!(matches!(verify_token(&token, &config()), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", config());
        assert!(!rendered.contains("test-secret"));
    }
}
