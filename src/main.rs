use std::net::TcpListener;

use workout_tracker::run;
use workout_tracker::config::settings::{get_api_key_settings, get_config, get_cors_settings};
use workout_tracker::db::{get_connection_pool, run_migrations};
use workout_tracker::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "workout-tracker".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    let connection_pool = get_connection_pool(&config.database)
        .await
        .expect("Failed to open the SQLite database");
    run_migrations(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Listening on {}", address);

    run(
        listener,
        connection_pool,
        get_api_key_settings(&config),
        get_cors_settings(&config)
    )?.await
}
