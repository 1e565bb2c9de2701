//! Create rainfall_entries table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RainfallEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RainfallEntries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RainfallEntries::Year).integer().not_null())
                    .col(ColumnDef::new(RainfallEntries::Amount).double().not_null())
                    .to_owned(),
            )
            .await?;

        // Year uniqueness lives in the store so concurrent writers cannot race it
        manager
            .create_index(
                Index::create()
                    .name("idx_rainfall_entries_year")
                    .table(RainfallEntries::Table)
                    .col(RainfallEntries::Year)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RainfallEntries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum RainfallEntries {
    Table,
    Id,
    Year,
    Amount,
}
