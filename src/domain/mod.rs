//! Domain layer - entities, value types and repository interfaces

pub mod rainfall;
pub mod user;

pub use rainfall::{
    CreateRainfallDto, RainfallEntry, RainfallRepositoryInterface, RainfallSummary,
    UpdateRainfallDto,
};
pub use user::{CreateUserDto, User, UserRepositoryInterface, UserRole};

pub use crate::shared::{DomainError, DomainResult};
