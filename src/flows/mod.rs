//! Client-side state machines driving session logging and progress charts.

pub mod cache;
pub mod log;
pub mod progress;

use crate::client::ClientError;

/// Identifies one workout selection. Responses that arrive for an older
/// token are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionToken(u64);

/// Current workout selection plus the token issued for it.
#[derive(Debug, Default)]
pub struct Selection {
    generation: u64,
    workout_id: Option<String>,
}

impl Selection {
    pub fn select(&mut self, workout_id: impl Into<String>) -> SelectionToken {
        self.generation += 1;
        self.workout_id = Some(workout_id.into());
        SelectionToken(self.generation)
    }

    /// Drop the selection. Any token handed out so far becomes stale.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.workout_id = None;
    }

    pub fn is_current(&self, token: SelectionToken) -> bool {
        self.workout_id.is_some() && token.0 == self.generation
    }

    pub fn workout_id(&self) -> Option<&str> {
        self.workout_id.as_deref()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("No workout selected")]
    NoWorkoutSelected,

    #[error("Labels for the selected workout are still loading")]
    NotReady,

    #[error("A label must be chosen or entered")]
    LabelRequired,

    #[error("A submission is already in flight")]
    SubmissionInFlight,

    #[error(transparent)]
    Client(#[from] ClientError),
}
