//! Authentication DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::domain::User;
use crate::infrastructure::crypto::password::MAX_PASSWORD_BYTES;

/// bcrypt ignores input past its byte limit, so longer passwords are refused.
fn password_fits_bcrypt(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        let mut err = ValidationError::new("password_too_long");
        err.message = Some(format!("password must be at most {} bytes", MAX_PASSWORD_BYTES).into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 80, message = "username must be 1-80 characters"))]
    pub username: String,
    #[validate(
        length(min = 1, message = "password is required"),
        custom(function = "password_fits_bcrypt")
    )]
    pub password: String,
    /// `admin` or `user`; defaults to `user`
    #[schema(example = "user")]
    pub role: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserInfo,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 80, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, max = 128, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserInfo {
    pub id: i32,
    pub username: String,
    pub role: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role.to_string(),
        }
    }
}
