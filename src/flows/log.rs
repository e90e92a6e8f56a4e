use std::collections::BTreeSet;
use std::time::Duration;

use tokio::time::Instant;

use crate::client::{ClientError, TrackerApi};
use crate::flows::cache::SessionCache;
use crate::flows::{FlowError, Selection, SelectionToken};
use crate::models::session::{NewSessionRequest, Session};

/// Form value of the "add a new label" option in the label picker.
pub const NEW_LABEL: &str = "new";
/// How long the success notification stays up.
pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(2);
pub const SUCCESS_MESSAGE: &str = "Session logged successfully";

/// Distinct non-empty labels, sorted ascending.
pub fn existing_labels(sessions: &[Session]) -> Vec<String> {
    sessions
        .iter()
        .filter_map(|session| session.label.as_deref())
        .filter(|label| !label.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LabelChoice {
    #[default]
    Unselected,
    Existing(String),
    /// Free-text label typed into the form.
    New,
}

impl LabelChoice {
    pub fn from_form_value(value: &str) -> Self {
        match value {
            "" => LabelChoice::Unselected,
            NEW_LABEL => LabelChoice::New,
            label => LabelChoice::Existing(label.to_string()),
        }
    }
}

/// Everything the form collects besides the workout and label choice.
#[derive(Debug, Clone, Default)]
pub struct SessionForm {
    pub value: f64,
    /// Only read when [`LabelChoice::New`] is selected.
    pub new_label: Option<String>,
    pub successful: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogState {
    Idle,
    LoadingLabels { workout_id: String },
    LabelsFailed { workout_id: String, message: String },
    Ready { workout_id: String, labels: Vec<String> },
    Submitting { workout_id: String, labels: Vec<String> },
}

/// Transient success toast. Visible until its deadline passes.
#[derive(Debug, Clone)]
pub struct Notification {
    message: &'static str,
    hide_at: Instant,
}

impl Notification {
    pub fn show(message: &'static str, duration: Duration) -> Self {
        Self {
            message,
            hide_at: Instant::now() + duration,
        }
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    pub fn is_visible(&self) -> bool {
        Instant::now() < self.hide_at
    }
}

/// State machine behind the "log a session" form.
#[derive(Debug)]
pub struct LogFlow {
    state: LogState,
    selection: Selection,
    label: LabelChoice,
    cache: SessionCache,
    notification: Option<Notification>,
}

impl Default for LogFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl LogFlow {
    pub fn new() -> Self {
        Self {
            state: LogState::Idle,
            selection: Selection::default(),
            label: LabelChoice::Unselected,
            cache: SessionCache::default(),
            notification: None,
        }
    }

    pub fn state(&self) -> &LogState {
        &self.state
    }

    pub fn selected_workout(&self) -> Option<&str> {
        self.selection.workout_id()
    }

    pub fn label_choice(&self) -> &LabelChoice {
        &self.label
    }

    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }

    /// Labels offered by the picker once loaded.
    pub fn labels(&self) -> Option<&[String]> {
        match &self.state {
            LogState::Ready { labels, .. } | LogState::Submitting { labels, .. } => Some(labels),
            _ => None,
        }
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref().filter(|n| n.is_visible())
    }

    /// Start a new selection. The label choice is reset so a label from a
    /// different workout cannot be submitted.
    pub fn select_workout(&mut self, workout_id: impl Into<String>) -> SelectionToken {
        let workout_id = workout_id.into();
        let token = self.selection.select(workout_id.clone());
        self.label = LabelChoice::Unselected;
        self.state = LogState::LoadingLabels { workout_id };
        token
    }

    /// Feed the sessions fetched for `token`. Returns `false` if the
    /// selection changed in the meantime and the response was dropped.
    pub fn apply_sessions(&mut self, token: SelectionToken, sessions: &[Session]) -> bool {
        if !self.selection.is_current(token) {
            tracing::debug!("Dropping stale session list");
            return false;
        }
        let Some(workout_id) = self.selection.workout_id().map(str::to_string) else {
            return false;
        };
        self.cache.insert(workout_id.clone(), sessions.to_vec());
        self.state = LogState::Ready {
            workout_id,
            labels: existing_labels(sessions),
        };
        true
    }

    /// Select a workout and load its label vocabulary through the cache.
    pub async fn load_labels<A: TrackerApi>(
        &mut self,
        api: &A,
        workout_id: &str,
    ) -> Result<(), ClientError> {
        let token = self.select_workout(workout_id);
        match self.cache.get_or_fetch(api, workout_id).await {
            Ok(sessions) => {
                self.apply_sessions(token, &sessions);
                Ok(())
            }
            Err(e) => {
                if self.selection.is_current(token) {
                    tracing::warn!("Failed to load labels for workout {}: {}", workout_id, e);
                    self.state = LogState::LabelsFailed {
                        workout_id: workout_id.to_string(),
                        message: e.to_string(),
                    };
                }
                Err(e)
            }
        }
    }

    pub fn choose_label(&mut self, choice: LabelChoice) {
        self.label = choice;
    }

    fn resolve_label(&self, new_label: Option<&str>) -> Option<String> {
        match &self.label {
            LabelChoice::Unselected => None,
            LabelChoice::Existing(label) => Some(label.clone()),
            LabelChoice::New => new_label
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .map(str::to_string),
        }
    }

    /// Validate the form and move to `Submitting`, returning the request
    /// to send. A second call before [`LogFlow::finish_submit`] is rejected.
    pub fn begin_submit(&mut self, form: SessionForm) -> Result<NewSessionRequest, FlowError> {
        let (workout_id, labels) = match &self.state {
            LogState::Ready { workout_id, labels } => (workout_id.clone(), labels.clone()),
            LogState::Submitting { .. } => return Err(FlowError::SubmissionInFlight),
            LogState::LoadingLabels { .. } | LogState::LabelsFailed { .. } => {
                return Err(FlowError::NotReady)
            }
            LogState::Idle => return Err(FlowError::NoWorkoutSelected),
        };
        let label = self
            .resolve_label(form.new_label.as_deref())
            .ok_or(FlowError::LabelRequired)?;

        self.state = LogState::Submitting {
            workout_id: workout_id.clone(),
            labels,
        };

        Ok(NewSessionRequest {
            workout_id,
            value: form.value,
            label,
            successful: form.successful,
            description: form.description.filter(|d| !d.is_empty()),
        })
    }

    /// Apply the outcome of the create call started by `begin_submit`.
    pub fn finish_submit(
        &mut self,
        result: Result<Session, ClientError>,
    ) -> Result<Session, FlowError> {
        let (workout_id, labels) = match &self.state {
            LogState::Submitting { workout_id, labels } => (workout_id.clone(), labels.clone()),
            _ => return Err(FlowError::NotReady),
        };

        match result {
            Ok(session) => {
                self.cache.invalidate(&workout_id);
                self.selection.clear();
                self.label = LabelChoice::Unselected;
                self.state = LogState::Idle;
                self.notification = Some(Notification::show(SUCCESS_MESSAGE, NOTIFICATION_DURATION));
                tracing::info!("Logged session {} for workout {}", session.id, workout_id);
                Ok(session)
            }
            Err(e) => {
                tracing::warn!("Failed to log session for workout {}: {}", workout_id, e);
                self.state = LogState::Ready { workout_id, labels };
                Err(FlowError::Client(e))
            }
        }
    }

    pub async fn submit<A: TrackerApi>(
        &mut self,
        api: &A,
        form: SessionForm,
    ) -> Result<Session, FlowError> {
        let request = self.begin_submit(form)?;
        let result = api.add_session(&request).await;
        self.finish_submit(result)
    }
}
