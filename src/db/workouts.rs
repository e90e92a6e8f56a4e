use sqlx::SqlitePool;

use crate::models::workout::Workout;

#[tracing::instrument(name = "Fetch all workouts", skip(pool))]
pub async fn fetch_workouts(pool: &SqlitePool) -> Result<Vec<Workout>, sqlx::Error> {
    sqlx::query_as::<_, Workout>("SELECT id, name, unit, label_unit FROM workouts")
        .fetch_all(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch workouts: {:?}", e);
            e
        })
}

#[tracing::instrument(name = "Fetch workout by id", skip(pool))]
pub async fn fetch_workout(pool: &SqlitePool, workout_id: &str) -> Result<Option<Workout>, sqlx::Error> {
    sqlx::query_as::<_, Workout>(
        "SELECT id, name, unit, label_unit FROM workouts WHERE id = ?",
    )
    .bind(workout_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch workout: {:?}", e);
        e
    })
}
