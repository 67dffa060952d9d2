pub use sea_orm_migration::prelude::*;

mod m20260720_000001_create_broker_profiles;
mod m20260720_000002_create_deposits;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260720_000001_create_broker_profiles::Migration),
            Box::new(m20260720_000002_create_deposits::Migration),
        ]
    }
}
