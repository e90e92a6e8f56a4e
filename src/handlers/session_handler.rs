use actix_web::{web, HttpResponse};
use chrono::{SecondsFormat, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db::sessions::{fetch_sessions_for_workout, insert_session};
use crate::errors::ApiError;
use crate::models::session::{CreateSessionPayload, NewSession};

#[tracing::instrument(name = "List sessions for workout", skip(pool))]
pub async fn list_sessions(
    pool: web::Data<SqlitePool>,
    workout_id: String,
) -> Result<HttpResponse, ApiError> {
    let sessions = fetch_sessions_for_workout(&pool, &workout_id).await?;
    Ok(HttpResponse::Ok().json(sessions))
}

#[tracing::instrument(
    name = "Create session",
    skip(payload, pool),
    fields(workout_id = ?payload.workout_id)
)]
pub async fn create_session(
    payload: CreateSessionPayload,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, ApiError> {
    let new_session = NewSession::try_from(payload)?;

    let id = Uuid::new_v4().to_string();
    let date = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    if !insert_session(&pool, &id, &date, &new_session).await? {
        return Err(ApiError::UnknownWorkout(new_session.workout_id));
    }

    tracing::info!("Session {} logged", id);
    // Echo what was written rather than reading the row back
    Ok(HttpResponse::Created().json(new_session.into_session(id, date)))
}
