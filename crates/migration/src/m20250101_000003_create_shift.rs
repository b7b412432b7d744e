//! Create `shift` table with FKs to `worker` and `location`.
//!
//! Deletes are restricted: a worker or location with shifts cannot be removed.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Shift::Table)
                    .if_not_exists()
                    .col(pk_auto(Shift::ShiftId))
                    .col(integer(Shift::WorkerId).not_null())
                    .col(integer(Shift::LocationId).not_null())
                    .col(date_time(Shift::StartTime).not_null())
                    .col(date_time(Shift::EndTime).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shift_worker")
                            .from(Shift::Table, Shift::WorkerId)
                            .to(Worker::Table, Worker::WorkerId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shift_location")
                            .from(Shift::Table, Shift::LocationId)
                            .to(Location::Table, Location::LocationId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Shift::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Shift { Table, ShiftId, WorkerId, LocationId, StartTime, EndTime }

#[derive(DeriveIden)]
enum Worker { Table, WorkerId }

#[derive(DeriveIden)]
enum Location { Table, LocationId }
