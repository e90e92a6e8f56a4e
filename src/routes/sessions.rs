use actix_web::{get, post, web, HttpResponse};
use sqlx::SqlitePool;

use crate::errors::ApiError;
use crate::handlers::session_handler;
use crate::models::session::CreateSessionPayload;

#[get("/sessions/{workout_id}")]
async fn list_sessions(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    session_handler::list_sessions(pool, path.into_inner()).await
}

#[post("/sessions")]
async fn create_session(
    payload: web::Json<CreateSessionPayload>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, ApiError> {
    session_handler::create_session(payload.into_inner(), pool).await
}
