//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250815_000001_create_user_table;
mod m20250815_000002_create_page_tables;
mod m20250815_000003_create_community_tables;
mod m20250815_000004_create_connection_table;
mod m20250815_000005_create_companion_table;
mod m20250815_000006_create_feature_flag_table;
mod m20250815_000007_create_event_tables;
mod m20250815_000008_create_thread_tables;
mod m20250815_000009_create_community_widget_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250815_000001_create_user_table::Migration),
            Box::new(m20250815_000002_create_page_tables::Migration),
            Box::new(m20250815_000003_create_community_tables::Migration),
            Box::new(m20250815_000004_create_connection_table::Migration),
            Box::new(m20250815_000005_create_companion_table::Migration),
            Box::new(m20250815_000006_create_feature_flag_table::Migration),
            Box::new(m20250815_000007_create_event_tables::Migration),
            Box::new(m20250815_000008_create_thread_tables::Migration),
            Box::new(m20250815_000009_create_community_widget_tables::Migration),
        ]
    }
}
