use std::env;
use std::str::FromStr;
use config::{Config, File, ConfigError};
use dotenv::dotenv;
use secrecy::{ExposeSecret, SecretString};
use sqlx::sqlite::SqliteConnectOptions;

use crate::client::Credentials;

#[derive(serde::Deserialize, Debug)]
pub struct Settings{
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
    pub client: ClientSettings
}

#[derive(serde::Deserialize, Debug)]
pub struct DatabaseSettings{
    pub url: SecretString,
    #[serde(default = "default_create_if_missing")]
    pub create_if_missing: bool
}

fn default_create_if_missing() -> bool {
    true
}

impl DatabaseSettings {
    pub fn connect_options(&self) -> Result<SqliteConnectOptions, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(self.url.expose_secret())?
            .create_if_missing(self.create_if_missing)
            .foreign_keys(true);
        Ok(options)
    }
}

#[derive(serde::Deserialize, Debug)]
pub struct ApplicationSettings{
    pub port: u16,
    pub host: String,
    pub log_level: String,
    pub api_key: SecretString,
    #[serde(default)]
    pub allowed_origins: Vec<String>
}

#[derive(serde::Deserialize, Debug)]
pub struct ClientSettings {
    pub base_url: String
}

/// Shared secret every mutating request has to present in `X-API-Key`.
#[derive(Debug, Clone)]
pub struct ApiKeySettings {
    pub secret: SecretString,
}

impl ApiKeySettings {
    pub fn new(secret: String) -> Self {
        Self {
            secret: SecretString::new(secret.into_boxed_str()),
        }
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.secret.expose_secret() == candidate
    }
}

/// CORS allow-list handed to the server factory.
#[derive(Debug, Clone, Default)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
}

pub fn get_config() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| ConfigError::Message(format!("Failed to determine the current directory: {}", e)))?;
    let configuration_directory = base_path.join("configuration");

    dotenv().ok();

    let environment: Environment = env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ConfigError::Message)?;

    let env_filename = format!("{}.yml", environment.as_str());
    let config = Config::builder()
        .add_source(File::from(configuration_directory.join("base.yml")))
        .add_source(File::from(configuration_directory.join(env_filename)).required(false))
        .add_source(
            config::Environment::default()
                .prefix("APP")
                .prefix_separator("__")
                .separator("__")
        )
        .build()?;

    let mut settings = config.try_deserialize::<Settings>()?;

    if let Ok(db_url) = env::var("DATABASE_URL") {
        settings.database.url = SecretString::new(db_url.into_boxed_str());
    }

    if let Ok(api_key) = env::var("API_KEY") {
        settings.application.api_key = SecretString::new(api_key.into_boxed_str());
    }

    Ok(settings)
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. \
                Use either `local` or `production`.",
                other
            )),
        }
    }
}

pub fn get_api_key_settings(settings: &Settings) -> ApiKeySettings {
    ApiKeySettings::new(settings.application.api_key.expose_secret().to_string())
}

pub fn get_cors_settings(settings: &Settings) -> CorsSettings {
    CorsSettings {
        allowed_origins: settings.application.allowed_origins.clone(),
    }
}

/// Credentials a client built from this configuration presents on writes.
pub fn get_client_credentials(settings: &Settings) -> Credentials {
    Credentials::new(settings.application.api_key.expose_secret().to_string())
}
