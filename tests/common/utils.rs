use secrecy::SecretString;
use serde_json::Value;
use sqlx::SqlitePool;
use std::net::TcpListener;
use uuid::Uuid;
use once_cell::sync::Lazy;
use reqwest::Client;

use workout_tracker::run;
use workout_tracker::client::ApiClient;
use workout_tracker::config::settings::{
    get_api_key_settings, get_client_credentials, get_config, get_cors_settings, DatabaseSettings,
};
use workout_tracker::db::{get_connection_pool, run_migrations};
use workout_tracker::telemetry::{get_subscriber, init_subscriber};

pub const TEST_API_KEY: &str = "test-api-key";
pub const ALLOWED_ORIGIN: &str = "http://localhost:3000";

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp{
    pub address: String,
    pub db_pool: SqlitePool,
    /// Client built from the same configuration the server was started with.
    pub api_client: ApiClient
}

pub async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let mut configuration = get_config().expect("Failed to read configuration.");
    // Every test gets its own database file
    let db_path = std::env::temp_dir().join(format!("workout_tracker_{}.db", Uuid::new_v4()));
    configuration.database.url =
        SecretString::new(format!("sqlite://{}", db_path.display()).into_boxed_str());
    configuration.database.create_if_missing = true;
    configuration.application.api_key = SecretString::new(TEST_API_KEY.into());
    configuration.application.allowed_origins = vec![ALLOWED_ORIGIN.to_string()];
    configuration.client.base_url = address.clone();

    let connection_pool = configure_db(&configuration.database).await;

    let server = run(
        listener,
        connection_pool.clone(),
        get_api_key_settings(&configuration),
        get_cors_settings(&configuration),
    )
        .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);
    TestApp {
        address,
        db_pool: connection_pool,
        api_client: ApiClient::from_settings(
            &configuration.client,
            get_client_credentials(&configuration),
        )
    }
}

pub async fn configure_db(config: &DatabaseSettings) -> SqlitePool {
    let connection_pool = get_connection_pool(config)
        .await
        .expect("Failed to open SQLite database.");
    run_migrations(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}

/// Workouts are administered out of band, so tests seed them directly.
pub async fn seed_workout(pool: &SqlitePool, id: &str, name: &str, unit: &str, label_unit: &str) {
    sqlx::query("INSERT INTO workouts (id, name, unit, label_unit) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(name)
        .bind(unit)
        .bind(label_unit)
        .execute(pool)
        .await
        .expect("Failed to seed workout.");
}

pub async fn seed_session(pool: &SqlitePool, workout_id: &str, value: f64, label: Option<&str>, date: &str) {
    sqlx::query(
        "INSERT INTO sessions (id, workout_id, value, label, successful, date, description) VALUES (?, ?, ?, ?, 1, ?, NULL)",
    )
        .bind(Uuid::new_v4().to_string())
        .bind(workout_id)
        .bind(value)
        .bind(label)
        .bind(date)
        .execute(pool)
        .await
        .expect("Failed to seed session.");
}

pub async fn count_sessions(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sessions")
        .fetch_one(pool)
        .await
        .expect("Failed to count sessions.")
}

impl TestApp {
    pub async fn post_session(&self, body: &Value) -> reqwest::Response {
        Client::new()
            .post(&format!("{}/sessions", &self.address))
            .header("X-API-Key", TEST_API_KEY)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_sessions(&self, workout_id: &str) -> reqwest::Response {
        Client::new()
            .get(&format!("{}/sessions/{}", &self.address, workout_id))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}
