//! Create `worker` table.
//!
//! Contact columns are nullable; the "at least one contact" rule is enforced
//! by the service layer.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Worker::Table)
                    .if_not_exists()
                    .col(pk_auto(Worker::WorkerId))
                    .col(string_len(Worker::Name, 100).not_null())
                    .col(string_len_null(Worker::Email, 254))
                    .col(string_len_null(Worker::PhoneNumber, 20))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Worker::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Worker { Table, WorkerId, Name, Email, PhoneNumber }
