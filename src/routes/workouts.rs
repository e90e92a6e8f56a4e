use actix_web::{get, web, HttpResponse};
use sqlx::SqlitePool;

use crate::errors::ApiError;
use crate::handlers::workout_handler;

#[get("/workouts")]
async fn list_workouts(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    workout_handler::list_workouts(pool).await
}

#[get("/workouts/{workout_id}")]
async fn get_workout(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    workout_handler::get_workout(pool, path.into_inner()).await
}
