use sqlx::SqlitePool;

use crate::models::session::{NewSession, Session, SessionRow};

#[tracing::instrument(name = "Fetch sessions for workout", skip(pool))]
pub async fn fetch_sessions_for_workout(
    pool: &SqlitePool,
    workout_id: &str,
) -> Result<Vec<Session>, sqlx::Error> {
    let rows = sqlx::query_as::<_, SessionRow>(
        r#"
        SELECT id, workout_id, value, label, successful, description, date
        FROM sessions
        WHERE workout_id = ?
        ORDER BY date ASC
        "#,
    )
    .bind(workout_id)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch sessions: {:?}", e);
        e
    })?;

    Ok(rows.into_iter().map(Session::from).collect())
}

/// Insert a session in a single statement, guarded by the workout reference.
///
/// Returns `false` when no workout with `session.workout_id` exists, in which
/// case nothing was written.
#[tracing::instrument(
    name = "Insert session into database",
    skip(pool, session),
    fields(workout_id = %session.workout_id, label = %session.label)
)]
pub async fn insert_session(
    pool: &SqlitePool,
    id: &str,
    date: &str,
    session: &NewSession,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO sessions (id, workout_id, value, label, successful, date, description)
        SELECT ?, ?, ?, ?, ?, ?, ?
        WHERE EXISTS (SELECT 1 FROM workouts WHERE id = ?)
        "#,
    )
    .bind(id)
    .bind(&session.workout_id)
    .bind(session.value)
    .bind(&session.label)
    .bind(session.successful_flag())
    .bind(date)
    .bind(&session.description)
    .bind(&session.workout_id)
    .execute(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute session insert query: {:?}", e);
        e
    })?;

    Ok(result.rows_affected() == 1)
}
