use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::SqlitePool;

/// Liveness plus a trivial round trip to the store.
#[tracing::instrument(name = "Backend health check", skip(pool))]
pub async fn backend_health_check(pool: web::Data<SqlitePool>) -> HttpResponse {
    match sqlx::query_scalar::<_, i64>("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(json!({
            "status": "UP",
            "database": "UP"
        })),
        Err(e) => {
            tracing::error!("Database health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "DOWN",
                "database": "DOWN",
                "error": e.to_string()
            }))
        }
    }
}
