pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_profiles_tables;
mod m20250301_000002_create_catalog_tables;
mod m20250301_000003_create_projects_tables;
mod m20250301_000004_create_project_workflow_tables;
mod m20250301_000005_create_user_tables;
mod m20250301_000006_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_profiles_tables::Migration),
            Box::new(m20250301_000002_create_catalog_tables::Migration),
            Box::new(m20250301_000003_create_projects_tables::Migration),
            Box::new(m20250301_000004_create_project_workflow_tables::Migration),
            Box::new(m20250301_000005_create_user_tables::Migration),
            Box::new(m20250301_000006_add_indexes::Migration),
        ]
    }
}
