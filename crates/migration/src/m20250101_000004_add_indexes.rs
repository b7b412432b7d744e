use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Shift: overlap lookups filter on (worker_id, location_id) and scan start_time
        manager
            .create_index(
                Index::create()
                    .name("idx_shift_worker_location_start")
                    .table(Shift::Table)
                    .col(Shift::WorkerId)
                    .col(Shift::LocationId)
                    .col(Shift::StartTime)
                    .to_owned(),
            )
            .await?;

        // Shift: delete guard on location
        manager
            .create_index(
                Index::create()
                    .name("idx_shift_location")
                    .table(Shift::Table)
                    .col(Shift::LocationId)
                    .to_owned(),
            )
            .await?;

        // Location: by-country / by-county lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_location_country_county")
                    .table(Location::Table)
                    .col(Location::Country)
                    .col(Location::County)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_shift_worker_location_start").table(Shift::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_shift_location").table(Shift::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_location_country_county").table(Location::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Shift { Table, WorkerId, LocationId, StartTime }

#[derive(DeriveIden)]
enum Location { Table, Country, County }
