//! Migrator for the SOS request table store.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_sos_request;
mod m20240101_000002_add_sos_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_sos_request::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000002_add_sos_indexes::Migration),
        ]
    }
}
