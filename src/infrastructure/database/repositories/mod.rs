//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories.

pub mod rainfall_repository;
pub mod user_repository;

pub use rainfall_repository::RainfallRepository;
pub use user_repository::UserRepository;

use sea_orm::{DbErr, SqlErr};

use crate::shared::DomainError;

fn db_err(e: DbErr) -> DomainError {
    DomainError::Internal(format!("Database error: {}", e))
}

fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
