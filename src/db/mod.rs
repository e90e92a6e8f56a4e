use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::config::settings::DatabaseSettings;

pub mod workouts;
pub mod sessions;

pub async fn get_connection_pool(settings: &DatabaseSettings) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(8)
        .connect_with(settings.connect_options()?)
        .await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
