mod api_client;

pub use api_client::ApiClient;

use secrecy::SecretString;

use crate::models::session::{NewSessionRequest, Session};
use crate::models::workout::Workout;

/// Credential presented on mutating calls. Passed explicitly into
/// [`ApiClient::new`] instead of being looked up per request.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: SecretString,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key: String = api_key.into();
        Self {
            api_key: SecretString::new(api_key.into_boxed_str()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Non-success status. The response body is deliberately dropped.
    #[error("{0}")]
    RequestFailed(&'static str),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// The three calls the logging and progress flows rely on.
#[allow(async_fn_in_trait)]
pub trait TrackerApi {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ClientError>;

    async fn get_sessions(&self, workout_id: &str) -> Result<Vec<Session>, ClientError>;

    async fn add_session(&self, request: &NewSessionRequest) -> Result<Session, ClientError>;
}
