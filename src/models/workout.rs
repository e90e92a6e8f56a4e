use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Exercise or metric definition. Seeded out of band, read-only here.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    pub name: String,
    pub unit: String,
    pub label_unit: String,
}
