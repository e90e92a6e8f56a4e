use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::ApiError;

/// One logged attempt at a workout, as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub workout_id: String,
    pub value: f64,
    #[serde(default)]
    pub label: Option<String>,
    pub successful: bool,
    #[serde(default)]
    pub description: Option<String>,
    pub date: String,
}

/// Row as stored; `successful` is an INTEGER flag in the table.
#[derive(Debug, FromRow)]
pub struct SessionRow {
    pub id: String,
    pub workout_id: String,
    pub value: f64,
    pub label: Option<String>,
    pub successful: i64,
    pub description: Option<String>,
    pub date: String,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Self {
            id: row.id,
            workout_id: row.workout_id,
            value: row.value,
            label: row.label,
            successful: row.successful == 1,
            description: row.description,
            date: row.date,
        }
    }
}

/// Untrusted body of `POST /sessions`. Every field is optional here so
/// presence can be checked explicitly when converting into [`NewSession`].
#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionPayload {
    pub workout_id: Option<String>,
    pub value: Option<f64>,
    pub label: Option<String>,
    pub successful: Option<serde_json::Value>,
    pub description: Option<String>,
}

/// A validated session ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSession {
    pub workout_id: String,
    pub value: f64,
    pub label: String,
    pub successful: bool,
    pub description: Option<String>,
}

impl TryFrom<CreateSessionPayload> for NewSession {
    type Error = ApiError;

    fn try_from(payload: CreateSessionPayload) -> Result<Self, Self::Error> {
        let workout_id = payload.workout_id.filter(|id| !id.is_empty());
        let label = payload.label.filter(|label| !label.is_empty());

        match (workout_id, payload.value, label) {
            (Some(workout_id), Some(value), Some(label)) => Ok(Self {
                workout_id,
                value,
                label,
                // Only the JSON literal `true` counts as a success
                successful: matches!(payload.successful, Some(serde_json::Value::Bool(true))),
                description: payload.description.filter(|d| !d.is_empty()),
            }),
            _ => Err(ApiError::MissingFields),
        }
    }
}

impl NewSession {
    pub fn successful_flag(&self) -> i64 {
        if self.successful { 1 } else { 0 }
    }

    pub fn into_session(self, id: String, date: String) -> Session {
        Session {
            id,
            workout_id: self.workout_id,
            value: self.value,
            label: Some(self.label),
            successful: self.successful,
            description: self.description,
            date,
        }
    }
}

/// Body the client sends to `POST /sessions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSessionRequest {
    pub workout_id: String,
    pub value: f64,
    pub label: String,
    pub successful: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
