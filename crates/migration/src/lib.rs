//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_worker;
mod m20250101_000002_create_location;
mod m20250101_000003_create_shift;
mod m20250101_000004_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_worker::Migration),
            Box::new(m20250101_000002_create_location::Migration),
            Box::new(m20250101_000003_create_shift::Migration),
            // Indexes should always be applied last
            Box::new(m20250101_000004_add_indexes::Migration),
        ]
    }
}
