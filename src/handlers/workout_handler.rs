use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;

use crate::db::workouts::{fetch_workout, fetch_workouts};
use crate::errors::ApiError;

#[tracing::instrument(name = "List workouts", skip(pool))]
pub async fn list_workouts(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let workouts = fetch_workouts(&pool).await?;
    Ok(HttpResponse::Ok().json(workouts))
}

#[tracing::instrument(name = "Get workout", skip(pool))]
pub async fn get_workout(
    pool: web::Data<SqlitePool>,
    workout_id: String,
) -> Result<HttpResponse, ApiError> {
    match fetch_workout(&pool, &workout_id).await? {
        Some(workout) => Ok(HttpResponse::Ok().json(workout)),
        None => Err(ApiError::NotFound(workout_id)),
    }
}
