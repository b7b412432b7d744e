use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Location::Table)
                    .if_not_exists()
                    .col(pk_auto(Location::LocationId))
                    .col(string_len(Location::Name, 100).not_null())
                    .col(string_len(Location::Address, 200).not_null())
                    .col(string_len(Location::Town, 100).not_null())
                    .col(string_len(Location::County, 100).not_null())
                    .col(string_len(Location::PostCode, 20).not_null())
                    .col(string_len(Location::Country, 100).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Location::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Location {
    Table,
    LocationId,
    Name,
    Address,
    Town,
    County,
    PostCode,
    Country,
}
