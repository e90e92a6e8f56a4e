use std::collections::HashMap;

use crate::client::{ClientError, TrackerApi};
use crate::models::session::Session;

/// Session lists keyed by workout id, reused until invalidated by a write.
#[derive(Debug, Default)]
pub struct SessionCache {
    entries: HashMap<String, Vec<Session>>,
}

impl SessionCache {
    pub fn get(&self, workout_id: &str) -> Option<&[Session]> {
        self.entries.get(workout_id).map(Vec::as_slice)
    }

    pub fn insert(&mut self, workout_id: impl Into<String>, sessions: Vec<Session>) {
        self.entries.insert(workout_id.into(), sessions);
    }

    pub fn invalidate(&mut self, workout_id: &str) {
        self.entries.remove(workout_id);
    }

    pub async fn get_or_fetch<A: TrackerApi>(
        &mut self,
        api: &A,
        workout_id: &str,
    ) -> Result<Vec<Session>, ClientError> {
        if let Some(sessions) = self.entries.get(workout_id) {
            return Ok(sessions.clone());
        }
        let sessions = api.get_sessions(workout_id).await?;
        self.entries.insert(workout_id.to_string(), sessions.clone());
        Ok(sessions)
    }
}
