//! Rainfall service: application-layer orchestration

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    CreateRainfallDto, DomainError, DomainResult, RainfallEntry, RainfallRepositoryInterface,
    RainfallSummary, UpdateRainfallDto,
};

use super::export::to_csv;

pub struct RainfallService {
    repo: Arc<dyn RainfallRepositoryInterface>,
}

impl RainfallService {
    pub fn new(repo: Arc<dyn RainfallRepositoryInterface>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> DomainResult<Vec<RainfallEntry>> {
        self.repo.list_entries().await
    }

    pub async fn add(&self, year: i32, amount: f64) -> DomainResult<RainfallEntry> {
        let entry = self
            .repo
            .create_entry(CreateRainfallDto { year, amount })
            .await?;

        info!(id = entry.id, year, amount, "Rainfall entry added");
        Ok(entry)
    }

    /// Apply a partial update. Omitted fields keep their stored value.
    pub async fn update(&self, id: i32, dto: UpdateRainfallDto) -> DomainResult<RainfallEntry> {
        let entry = self.repo.update_entry(id, dto).await?;

        info!(id, year = entry.year, amount = entry.amount, "Rainfall entry updated");
        Ok(entry)
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        self.repo.delete_entry(id).await?;

        info!(id, "Rainfall entry deleted");
        Ok(())
    }

    pub async fn get(&self, id: i32) -> DomainResult<RainfallEntry> {
        self.repo
            .get_entry(id)
            .await?
            .ok_or_else(|| DomainError::not_found("RainfallEntry", id))
    }

    /// Aggregate statistics; all zeros when there are no entries.
    pub async fn analytics(&self) -> DomainResult<RainfallSummary> {
        let entries = self.repo.list_entries().await?;
        Ok(RainfallSummary::from_amounts(
            entries.iter().map(|e| e.amount),
        ))
    }

    pub async fn export_csv(&self) -> DomainResult<String> {
        let entries = self.repo.list_entries().await?;
        Ok(to_csv(&entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::RainfallRepository;
    use crate::infrastructure::database::test_database;

    async fn service() -> RainfallService {
        RainfallService::new(Arc::new(RainfallRepository::new(test_database().await)))
    }

    #[tokio::test]
    async fn analytics_on_empty_store_is_all_zero() {
        let summary = service().await.analytics().await.unwrap();

        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.average, 0.0);
        assert_eq!(summary.highest, 0.0);
        assert_eq!(summary.lowest, 0.0);
        assert_eq!(summary.count, 0);
    }

    #[tokio::test]
    async fn analytics_over_entries() {
        let service = service().await;
        service.add(2020, 10.0).await.unwrap();
        service.add(2021, 20.0).await.unwrap();

        let summary = service.analytics().await.unwrap();
        assert_eq!(summary.total, 30.0);
        assert_eq!(summary.average, 15.0);
        assert_eq!(summary.highest, 20.0);
        assert_eq!(summary.lowest, 10.0);
        assert_eq!(summary.count, 2);
    }

    #[tokio::test]
    async fn duplicate_year_is_rejected() {
        let service = service().await;
        service.add(2020, 10.0).await.unwrap();

        let err = service.add(2020, 11.0).await.unwrap_err();
        assert!(matches!(err, DomainError::DuplicateYear(2020)));
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn partial_update_keeps_other_field() {
        let service = service().await;
        let entry = service.add(2020, 10.0).await.unwrap();

        let updated = service
            .update(
                entry.id,
                UpdateRainfallDto {
                    amount: Some(12.5),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.year, 2020);
        assert_eq!(updated.amount, 12.5);
        assert_eq!(service.get(entry.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let service = service().await;
        let entry = service.add(2020, 10.0).await.unwrap();

        service.delete(entry.id).await.unwrap();

        assert!(matches!(
            service.get(entry.id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service.delete(entry.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn export_reflects_store() {
        let service = service().await;
        service.add(2020, 10.0).await.unwrap();

        assert_eq!(
            service.export_csv().await.unwrap(),
            "Year,Amount\r\n2020,10.0\r\n"
        );
    }
}
