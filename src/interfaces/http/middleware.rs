//! Authentication middleware for Axum

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::domain::UserRole;
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig, TokenClaims, TokenError};
use crate::interfaces::http::common::ApiError;

/// Authentication error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
    InsufficientPermissions,
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        let (status, code, message) = match error {
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "missing_token",
                "Missing authentication token",
            ),
            AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "invalid_token",
                "Invalid authentication token",
            ),
            AuthError::ExpiredToken => {
                (StatusCode::UNAUTHORIZED, "token_expired", "Token has expired")
            }
            AuthError::InsufficientPermissions => {
                (StatusCode::FORBIDDEN, "forbidden", "Admin access required")
            }
        };

        ApiError::new(status, code, message)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

/// Authentication state containing the token configuration
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Verified caller identity, inserted into request extensions
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub username: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    /// Tokens whose subject or role cannot be resolved are treated as invalid.
    pub fn from_claims(claims: TokenClaims) -> Option<Self> {
        Some(Self {
            user_id: claims.user_id()?,
            role: claims.user_role()?,
            username: claims.username,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// JWT authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(auth_header) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        return AuthError::MissingToken.into_response();
    };

    let Some(token) = extract_token(auth_header) else {
        return AuthError::InvalidToken.into_response();
    };

    let claims = match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => claims,
        Err(TokenError::Expired) => {
            debug!("Rejected expired token");
            return AuthError::ExpiredToken.into_response();
        }
        Err(e) => {
            debug!(error = %e, "Rejected token");
            return AuthError::InvalidToken.into_response();
        }
    };

    let Some(user) = AuthenticatedUser::from_claims(claims) else {
        return AuthError::InvalidToken.into_response();
    };

    request.extensions_mut().insert(user);
    next.run(request).await
}

/// Admin gate. Must run inside `auth_middleware`; without a verified
/// identity it answers 401, never 403.
pub async fn require_admin(request: Request<Body>, next: Next) -> Response {
    let Some(user) = request.extensions().get::<AuthenticatedUser>() else {
        return AuthError::MissingToken.into_response();
    };

    if !user.is_admin() {
        debug!(user_id = user.user_id, username = %user.username, "Admin route denied");
        return AuthError::InsufficientPermissions.into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_bearer_token_only() {
        assert_eq!(extract_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(extract_token("Basic dXNlcjpwdw=="), None);
        assert_eq!(extract_token("Bearer "), None);
        assert_eq!(extract_token("abc.def"), None);
    }

    #[test]
    fn auth_errors_split_401_and_403() {
        for err in [
            AuthError::MissingToken,
            AuthError::InvalidToken,
            AuthError::ExpiredToken,
        ] {
            assert_eq!(ApiError::from(err).status, StatusCode::UNAUTHORIZED);
        }
        assert_eq!(
            ApiError::from(AuthError::InsufficientPermissions).status,
            StatusCode::FORBIDDEN
        );
    }
}
