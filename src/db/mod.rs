pub mod applications;
pub mod catalog;
pub mod client_profiles;
pub mod disputes;
pub mod files;
pub mod freelancer_profiles;
pub mod milestones;
pub mod preferences;
pub mod profiles;
pub mod projects;
pub mod reviews;
pub mod saved_projects;
pub mod subscriptions;
pub mod time_tracking;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Create a SeaORM database connection pool.
pub async fn create_pool(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opts = ConnectOptions::new(database_url.to_owned());
    opts.sqlx_logging(false);
    Database::connect(opts).await
}
