use sea_orm_migration::prelude::*;

mod m20250301_initial_catalog;
mod m20250302_unique_constraints;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_initial_catalog::Migration),
            Box::new(m20250302_unique_constraints::Migration),
        ]
    }
}
