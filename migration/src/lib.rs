pub use sea_orm_migration::prelude::*;

mod m20260801_000001_create_account_tables;
mod m20260801_000002_create_catalog_tables;
mod m20260801_000003_create_order_tables;
mod m20260801_000004_create_project_tables;
mod m20260801_000005_create_request_tables;
mod m20260801_000006_create_chat_tables;
mod m20260801_000007_create_academy_tables;
mod m20260801_000008_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_account_tables::Migration),
            Box::new(m20260801_000002_create_catalog_tables::Migration),
            Box::new(m20260801_000003_create_order_tables::Migration),
            Box::new(m20260801_000004_create_project_tables::Migration),
            Box::new(m20260801_000005_create_request_tables::Migration),
            Box::new(m20260801_000006_create_chat_tables::Migration),
            Box::new(m20260801_000007_create_academy_tables::Migration),
            Box::new(m20260801_000008_add_indexes::Migration),
        ]
    }
}
