use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
    Set,
};

use super::{db_err, is_unique_violation};
use crate::domain::{
    CreateRainfallDto, DomainError, DomainResult, RainfallEntry, RainfallRepositoryInterface,
    UpdateRainfallDto,
};
use crate::infrastructure::database::entities::rainfall_entry;

const ENTITY: &str = "RainfallEntry";

pub struct RainfallRepository {
    db: DatabaseConnection,
}

impl RainfallRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(model: rainfall_entry::Model) -> RainfallEntry {
    RainfallEntry {
        id: model.id,
        year: model.year,
        amount: model.amount,
    }
}

fn write_err(e: DbErr, year: i32) -> DomainError {
    if is_unique_violation(&e) {
        DomainError::DuplicateYear(year)
    } else {
        db_err(e)
    }
}

#[async_trait]
impl RainfallRepositoryInterface for RainfallRepository {
    async fn list_entries(&self) -> DomainResult<Vec<RainfallEntry>> {
        let models = rainfall_entry::Entity::find()
            .order_by_asc(rainfall_entry::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn get_entry(&self, id: i32) -> DomainResult<Option<RainfallEntry>> {
        let model = rainfall_entry::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(model_to_domain))
    }

    async fn create_entry(&self, dto: CreateRainfallDto) -> DomainResult<RainfallEntry> {
        let active = rainfall_entry::ActiveModel {
            id: NotSet,
            year: Set(dto.year),
            amount: Set(dto.amount),
        };

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| write_err(e, dto.year))?;

        Ok(model_to_domain(model))
    }

    async fn update_entry(&self, id: i32, dto: UpdateRainfallDto) -> DomainResult<RainfallEntry> {
        let existing = rainfall_entry::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))?;

        if dto.is_empty() {
            return Ok(model_to_domain(existing));
        }

        let target_year = dto.year.unwrap_or(existing.year);
        let mut active: rainfall_entry::ActiveModel = existing.into();

        if let Some(year) = dto.year {
            active.year = Set(year);
        }
        if let Some(amount) = dto.amount {
            active.amount = Set(amount);
        }

        let updated = active.update(&self.db).await.map_err(|e| match e {
            // Deleted between the lookup and the write
            DbErr::RecordNotUpdated => DomainError::not_found(ENTITY, id),
            e => write_err(e, target_year),
        })?;

        Ok(model_to_domain(updated))
    }

    async fn delete_entry(&self, id: i32) -> DomainResult<()> {
        let result = rainfall_entry::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found(ENTITY, id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_database;

    async fn repo() -> RainfallRepository {
        RainfallRepository::new(test_database().await)
    }

    async fn add(repo: &RainfallRepository, year: i32, amount: f64) -> RainfallEntry {
        repo.create_entry(CreateRainfallDto { year, amount })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let repo = repo().await;
        add(&repo, 2021, 20.0).await;
        add(&repo, 2019, 5.5).await;
        add(&repo, 2020, 10.0).await;

        let years: Vec<i32> = repo
            .list_entries()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.year)
            .collect();
        assert_eq!(years, vec![2021, 2019, 2020]);
    }

    #[tokio::test]
    async fn duplicate_year_is_rejected_by_the_store() {
        let repo = repo().await;
        add(&repo, 2020, 5.0).await;

        let err = repo
            .create_entry(CreateRainfallDto { year: 2020, amount: 5.0 })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::DuplicateYear(2020)));
        assert_eq!(repo.list_entries().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn partial_update_keeps_omitted_fields() {
        let repo = repo().await;
        let entry = add(&repo, 2020, 10.0).await;

        let updated = repo
            .update_entry(
                entry.id,
                UpdateRainfallDto {
                    year: Some(2022),
                    amount: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.year, 2022);
        assert_eq!(updated.amount, 10.0);

        let updated = repo
            .update_entry(
                entry.id,
                UpdateRainfallDto {
                    year: None,
                    amount: Some(12.5),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.year, 2022);
        assert_eq!(updated.amount, 12.5);
    }

    #[tokio::test]
    async fn update_to_existing_year_is_rejected() {
        let repo = repo().await;
        add(&repo, 2020, 10.0).await;
        let other = add(&repo, 2021, 20.0).await;

        let err = repo
            .update_entry(
                other.id,
                UpdateRainfallDto {
                    year: Some(2020),
                    amount: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::DuplicateYear(2020)));
        let unchanged = repo.get_entry(other.id).await.unwrap().unwrap();
        assert_eq!(unchanged.year, 2021);
    }

    #[tokio::test]
    async fn update_keeping_own_year_is_allowed() {
        let repo = repo().await;
        let entry = add(&repo, 2020, 10.0).await;

        let updated = repo
            .update_entry(
                entry.id,
                UpdateRainfallDto {
                    year: Some(2020),
                    amount: Some(11.0),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.amount, 11.0);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let repo = repo().await;

        let err = repo
            .update_entry(99, UpdateRainfallDto::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id: 99, .. }));

        let err = repo.delete_entry(99).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id: 99, .. }));
    }

    #[tokio::test]
    async fn delete_removes_entry() {
        let repo = repo().await;
        let entry = add(&repo, 2020, 10.0).await;

        repo.delete_entry(entry.id).await.unwrap();

        assert!(repo.get_entry(entry.id).await.unwrap().is_none());
        assert!(repo.list_entries().await.unwrap().is_empty());
    }
}
