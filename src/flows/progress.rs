use crate::chart::{build_chart, ChartData};
use crate::client::{ClientError, TrackerApi};
use crate::flows::{Selection, SelectionToken};
use crate::models::session::Session;
use crate::models::workout::Workout;

pub const NO_SELECTION_MESSAGE: &str = "Select a workout to view progress.";
pub const EMPTY_MESSAGE: &str = "No sessions recorded yet.";

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressView {
    NoSelection,
    Loading,
    Failed(String),
    Empty,
    Chart(ChartData),
}

impl ProgressView {
    /// Placeholder text shown instead of a chart, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            ProgressView::NoSelection => Some(NO_SELECTION_MESSAGE),
            ProgressView::Empty => Some(EMPTY_MESSAGE),
            ProgressView::Failed(message) => Some(message.as_str()),
            ProgressView::Loading | ProgressView::Chart(_) => None,
        }
    }
}

#[derive(Debug)]
enum Loaded {
    Pending,
    Sessions(Vec<Session>),
    Failed(String),
}

/// Drives the progress page: workout list, current selection and the
/// sessions of the selected workout.
#[derive(Debug)]
pub struct ProgressFlow {
    workouts: Vec<Workout>,
    selection: Selection,
    loaded: Loaded,
}

impl Default for ProgressFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressFlow {
    pub fn new() -> Self {
        Self {
            workouts: Vec::new(),
            selection: Selection::default(),
            loaded: Loaded::Pending,
        }
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn set_workouts(&mut self, workouts: Vec<Workout>) {
        self.workouts = workouts;
    }

    pub async fn load_workouts<A: TrackerApi>(&mut self, api: &A) -> Result<(), ClientError> {
        self.workouts = api.get_workouts().await?;
        Ok(())
    }

    pub fn selected_workout(&self) -> Option<&Workout> {
        let workout_id = self.selection.workout_id()?;
        self.workouts.iter().find(|workout| workout.id == workout_id)
    }

    pub fn select_workout(&mut self, workout_id: impl Into<String>) -> SelectionToken {
        self.loaded = Loaded::Pending;
        self.selection.select(workout_id)
    }

    /// Store the outcome of a session fetch. Responses for a selection that
    /// has since been replaced are dropped and `false` is returned.
    pub fn apply_sessions(
        &mut self,
        token: SelectionToken,
        result: Result<Vec<Session>, ClientError>,
    ) -> bool {
        if !self.selection.is_current(token) {
            tracing::debug!("Dropping stale progress response");
            return false;
        }
        self.loaded = match result {
            Ok(sessions) => Loaded::Sessions(sessions),
            Err(e) => Loaded::Failed(e.to_string()),
        };
        true
    }

    /// Select a workout and fetch its sessions.
    pub async fn show<A: TrackerApi>(&mut self, api: &A, workout_id: &str) -> bool {
        let token = self.select_workout(workout_id);
        let result = api.get_sessions(workout_id).await;
        self.apply_sessions(token, result)
    }

    pub fn sessions(&self) -> Option<&[Session]> {
        match &self.loaded {
            Loaded::Sessions(sessions) => Some(sessions),
            _ => None,
        }
    }

    pub fn view(&self) -> ProgressView {
        if self.selection.workout_id().is_none() {
            return ProgressView::NoSelection;
        }
        match &self.loaded {
            Loaded::Pending => ProgressView::Loading,
            Loaded::Failed(message) => ProgressView::Failed(message.clone()),
            Loaded::Sessions(sessions) if sessions.is_empty() => ProgressView::Empty,
            Loaded::Sessions(sessions) => match self.selected_workout() {
                Some(workout) => build_chart(sessions, workout)
                    .map(ProgressView::Chart)
                    .unwrap_or(ProgressView::Empty),
                // Workout list not loaded yet
                None => ProgressView::Loading,
            },
        }
    }
}
