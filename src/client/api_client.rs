use reqwest::{Client, Url};
use secrecy::ExposeSecret;

use crate::client::{ClientError, Credentials, TrackerApi};
use crate::config::settings::ClientSettings;
use crate::middleware::api_key::API_KEY_HEADER;
use crate::models::session::{NewSessionRequest, Session};
use crate::models::workout::Workout;

/// Typed wrapper around the tracker's HTTP surface.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    credentials: Credentials,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub fn from_settings(settings: &ClientSettings, credentials: Credentials) -> Self {
        Self::new(settings.base_url.clone(), credentials)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `/sessions/{workout_id}` with the id encoded as a single path segment.
    fn sessions_url(&self, workout_id: &str) -> Result<Url, ClientError> {
        let invalid = || ClientError::InvalidBaseUrl(self.base_url.clone());
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .push("sessions")
            .push(workout_id);
        Ok(url)
    }
}

impl TrackerApi for ApiClient {
    #[tracing::instrument(name = "Client: fetch workouts", skip(self))]
    async fn get_workouts(&self) -> Result<Vec<Workout>, ClientError> {
        let response = self.http.get(self.url("/workouts")).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::RequestFailed("Failed to fetch workouts"));
        }
        Ok(response.json().await?)
    }

    #[tracing::instrument(name = "Client: fetch sessions", skip(self))]
    async fn get_sessions(&self, workout_id: &str) -> Result<Vec<Session>, ClientError> {
        let response = self
            .http
            .get(self.sessions_url(workout_id)?)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ClientError::RequestFailed("Failed to fetch sessions"));
        }
        Ok(response.json().await?)
    }

    #[tracing::instrument(
        name = "Client: add session",
        skip(self, request),
        fields(workout_id = %request.workout_id)
    )]
    async fn add_session(&self, request: &NewSessionRequest) -> Result<Session, ClientError> {
        let response = self
            .http
            .post(self.url("/sessions"))
            .header(API_KEY_HEADER, self.credentials.api_key.expose_secret())
            .json(request)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ClientError::RequestFailed("Failed to add session"));
        }
        Ok(response.json().await?)
    }
}
