use async_trait::async_trait;

use super::{CreateUserDto, User};
use crate::shared::DomainResult;

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    /// Fails with `DuplicateUsername` when the username is taken.
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;

    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>>;
    async fn count_users(&self) -> DomainResult<u64>;
}
