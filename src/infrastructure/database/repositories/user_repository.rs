use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, Set,
};

use super::{db_err, is_unique_violation};
use crate::domain::{CreateUserDto, DomainError, DomainResult, User, UserRepositoryInterface, UserRole};
use crate::infrastructure::database::entities::user;

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::Admin => UserRole::Admin,
        user::UserRole::User => UserRole::User,
    }
}

fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::Admin => user::UserRole::Admin,
        UserRole::User => user::UserRole::User,
    }
}

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        password_hash: model.password_hash,
        role: entity_role_to_domain(model.role),
        created_at: model.created_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let new_user = user::ActiveModel {
            id: NotSet,
            username: Set(dto.username.clone()),
            password_hash: Set(dto.password_hash),
            role: Set(domain_role_to_entity(dto.role)),
            created_at: Set(Utc::now()),
        };

        let model = new_user.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::DuplicateUsername(dto.username)
            } else {
                db_err(e)
            }
        })?;

        Ok(user_model_to_domain(model))
    }

    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn count_users(&self) -> DomainResult<u64> {
        user::Entity::find().count(&self.db).await.map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_database;

    fn dto(username: &str, role: UserRole) -> CreateUserDto {
        CreateUserDto {
            username: username.to_string(),
            password_hash: "hash".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn ids_are_assigned_monotonically() {
        let repo = UserRepository::new(test_database().await);

        let first = repo.create_user(dto("alice", UserRole::Admin)).await.unwrap();
        let second = repo.create_user(dto("bob", UserRole::User)).await.unwrap();

        assert!(second.id > first.id);
        assert_eq!(first.role, UserRole::Admin);
        assert_eq!(second.role, UserRole::User);
    }

    #[tokio::test]
    async fn unique_index_rejects_duplicate_username() {
        let repo = UserRepository::new(test_database().await);
        repo.create_user(dto("alice", UserRole::User)).await.unwrap();

        let err = repo.create_user(dto("alice", UserRole::Admin)).await.unwrap_err();

        assert!(matches!(err, DomainError::DuplicateUsername(ref name) if name == "alice"));
        assert_eq!(repo.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn lookup_by_username() {
        let repo = UserRepository::new(test_database().await);
        let created = repo.create_user(dto("carol", UserRole::User)).await.unwrap();

        let by_name = repo.get_user_by_username("carol").await.unwrap().unwrap();
        assert_eq!(by_name.id, created.id);
        assert_eq!(by_name.username, "carol");
        assert_eq!(by_name.role, UserRole::User);

        assert!(repo.get_user_by_username("nobody").await.unwrap().is_none());
    }
}
