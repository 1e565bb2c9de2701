//! User service: application-layer orchestration
//!
//! HTTP handlers are thin wrappers that delegate to this service.

use std::sync::{Arc, OnceLock};

use bcrypt::BcryptError;

use tracing::{debug, info};

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, User, UserRepositoryInterface, UserRole,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{
    hash_password, verify_password, MAX_PASSWORD_BYTES,
};

/// Hashed once and checked against on unknown-user logins, so every
/// login attempt pays for one bcrypt verify.
const TIMING_GUARD_PASSWORD: &str = "rainfall-timing-guard";

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

pub struct UserService {
    repo: Arc<dyn UserRepositoryInterface>,
    jwt_config: JwtConfig,
    bcrypt_cost: u32,
    dummy_hash: OnceLock<String>,
}

impl UserService {
    pub fn new(
        repo: Arc<dyn UserRepositoryInterface>,
        jwt_config: JwtConfig,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            repo,
            jwt_config,
            bcrypt_cost,
            dummy_hash: OnceLock::new(),
        }
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new user. `role` defaults to `user`; anything other than
    /// `admin` / `user` (case-insensitive) is a validation error.
    ///
    /// No token is issued; the caller logs in separately.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        role: Option<&str>,
    ) -> DomainResult<User> {
        let role = match role {
            Some(raw) => raw.parse::<UserRole>()?,
            None => UserRole::default(),
        };

        // Cheap pre-check so a taken name skips hashing; the unique index
        // still settles concurrent registrations.
        if self.repo.get_user_by_username(username).await?.is_some() {
            return Err(DomainError::DuplicateUsername(username.to_string()));
        }

        let password_hash = self.hash(password).await?;

        let user = self
            .repo
            .create_user(CreateUserDto {
                username: username.to_string(),
                password_hash,
                role,
            })
            .await?;

        info!(user_id = user.id, username = %user.username, role = %user.role, "New user registered");
        Ok(user)
    }

    // ── Authentication ──────────────────────────────────────────

    /// Check credentials. Unknown users and wrong passwords fail identically.
    pub async fn authenticate(&self, username: &str, password: &str) -> DomainResult<User> {
        let Some(user) = self.repo.get_user_by_username(username).await? else {
            debug!(username, "Login for unknown user");
            let dummy = self.dummy_hash().await?;
            self.verify(password, &dummy).await?;
            return Err(DomainError::InvalidCredentials);
        };

        if !self.verify(password, &user.password_hash).await? {
            debug!(username, "Login with wrong password");
            return Err(DomainError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Authenticate and issue a signed token.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<AuthResult> {
        let user = self.authenticate(username, password).await?;

        let token = create_token(user.id, &user.username, user.role, &self.jwt_config)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        info!(user_id = user.id, username = %user.username, "User logged in");

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expires_in(),
            user,
        })
    }

    // ── Bootstrap ───────────────────────────────────────────────

    /// Create an admin account when no users exist yet.
    /// Returns `true` if an account was created.
    pub async fn bootstrap_admin(&self, username: &str, password: &str) -> DomainResult<bool> {
        if self.repo.count_users().await? > 0 {
            return Ok(false);
        }

        self.register(username, password, Some(UserRole::Admin.as_str()))
            .await?;
        info!(username, "Default admin created");
        Ok(true)
    }

    // ── Helpers ─────────────────────────────────────────────────

    async fn hash(&self, password: &str) -> DomainResult<String> {
        let password = password.to_owned();
        let cost = self.bcrypt_cost;

        tokio::task::spawn_blocking(move || hash_password(&password, cost))
            .await
            .map_err(|e| DomainError::Internal(format!("Hashing task failed: {}", e)))?
            .map_err(|e| match e {
                BcryptError::Truncation(_) => DomainError::Validation(format!(
                    "password must be at most {} bytes",
                    MAX_PASSWORD_BYTES
                )),
                e => DomainError::Internal(format!("Failed to hash password: {}", e)),
            })
    }

    async fn dummy_hash(&self) -> DomainResult<String> {
        if let Some(hash) = self.dummy_hash.get() {
            return Ok(hash.clone());
        }
        let hash = self.hash(TIMING_GUARD_PASSWORD).await?;
        Ok(self.dummy_hash.get_or_init(|| hash).clone())
    }

    /// A malformed stored hash or an overlong password counts as a mismatch.
    async fn verify(&self, password: &str, hash: &str) -> DomainResult<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();

        let valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| DomainError::Internal(format!("Hashing task failed: {}", e)))?
            .unwrap_or(false);

        Ok(valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::crypto::jwt::verify_token;
    use crate::infrastructure::crypto::password::MIN_COST;
    use crate::infrastructure::database::repositories::UserRepository;
    use crate::infrastructure::database::test_database;

    async fn service() -> UserService {
        let repo = Arc::new(UserRepository::new(test_database().await));
        UserService::new(repo, JwtConfig::new("test-secret", 1), MIN_COST)
    }

    #[tokio::test]
    async fn register_then_login_embeds_role() {
        let service = service().await;

        for (name, role) in [("alice", "admin"), ("bob", "user")] {
            let user = service.register(name, "pw-123", Some(role)).await.unwrap();
            assert_eq!(user.role.as_str(), role);

            let auth = service.login(name, "pw-123").await.unwrap();
            let claims = verify_token(&auth.token, service.jwt_config()).unwrap();
            assert_eq!(claims.role, role);
            assert_eq!(claims.user_id(), Some(user.id));
            assert_eq!(auth.expires_in, 3600);
        }
    }

    #[tokio::test]
    async fn role_defaults_to_user_and_is_lowercased() {
        let service = service().await;

        let plain = service.register("carol", "pw", None).await.unwrap();
        assert_eq!(plain.role, UserRole::User);

        let shouty = service.register("dave", "pw", Some("ADMIN")).await.unwrap();
        assert_eq!(shouty.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn unknown_role_is_a_validation_error() {
        let service = service().await;

        let err = service
            .register("eve", "pw", Some("superuser"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert!(service.login("eve", "pw").await.is_err());
    }

    #[tokio::test]
    async fn duplicate_username_leaves_store_unchanged() {
        let service = service().await;
        service.register("alice", "first", None).await.unwrap();

        let err = service
            .register("alice", "second", Some("admin"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateUsername(_)));

        // Original credentials and role still apply
        let auth = service.login("alice", "first").await.unwrap();
        assert_eq!(auth.user.role, UserRole::User);
        assert!(service.login("alice", "second").await.is_err());
    }

    #[tokio::test]
    async fn bad_credentials_are_indistinguishable() {
        let service = service().await;
        service.register("alice", "secret", None).await.unwrap();

        let unknown = service.login("nobody", "secret").await.unwrap_err();
        let wrong = service.login("alice", "nope").await.unwrap_err();

        assert!(matches!(unknown, DomainError::InvalidCredentials));
        assert!(matches!(wrong, DomainError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn unknown_user_still_runs_a_verify() {
        let service = service().await;
        assert!(service.dummy_hash.get().is_none());

        let err = service.login("nobody", "whatever").await.unwrap_err();

        assert!(matches!(err, DomainError::InvalidCredentials));
        let dummy = service.dummy_hash.get().unwrap();
        assert!(verify_password(TIMING_GUARD_PASSWORD, dummy).unwrap());
    }

    #[tokio::test]
    async fn overlong_password_is_rejected_not_truncated() {
        let service = service().await;
        let prefix = "p".repeat(MAX_PASSWORD_BYTES);

        let err = service
            .register("alice", &format!("{}-tail", prefix), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        service.register("alice", &prefix, None).await.unwrap();
        let err = service
            .login("alice", &format!("{}-other", prefix))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn bootstrap_admin_only_on_empty_store() {
        let service = service().await;

        assert!(service.bootstrap_admin("root", "root-pw").await.unwrap());
        assert!(!service.bootstrap_admin("root2", "pw").await.unwrap());

        let auth = service.login("root", "root-pw").await.unwrap();
        assert!(auth.user.role.is_admin());
    }
}
