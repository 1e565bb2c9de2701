use async_trait::async_trait;

use super::{CreateRainfallDto, RainfallEntry, UpdateRainfallDto};
use crate::shared::DomainResult;

#[async_trait]
pub trait RainfallRepositoryInterface: Send + Sync {
    /// All entries in insertion order.
    async fn list_entries(&self) -> DomainResult<Vec<RainfallEntry>>;
    async fn get_entry(&self, id: i32) -> DomainResult<Option<RainfallEntry>>;

    /// Fails with `DuplicateYear` when the year is already recorded.
    async fn create_entry(&self, dto: CreateRainfallDto) -> DomainResult<RainfallEntry>;

    /// Fails with `NotFound` for an unknown id and `DuplicateYear` when the
    /// new year belongs to another entry.
    async fn update_entry(&self, id: i32, dto: UpdateRainfallDto) -> DomainResult<RainfallEntry>;
    async fn delete_entry(&self, id: i32) -> DomainResult<()>;
}
