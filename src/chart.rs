//! Shapes a workout's session history into renderer-ready line series.
//!
//! Sessions are split by label, every series is laid out on the same
//! calendar-day axis and days without a session for a label become gaps
//! that the renderer bridges instead of plotting as zero.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::session::Session;
use crate::models::workout::Workout;

/// Series colours, cycled by group index.
pub const PALETTE: [&str; 4] = ["#0284c7", "#10b981", "#f59e0b", "#8b5cf6"];
/// Point colour for unsuccessful sessions.
pub const FAILURE_COLOR: &str = "#ef4444";
/// Bucket for sessions without a label.
pub const DEFAULT_LABEL: &str = "Default";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: String,
    pub value: Option<f64>,
    pub description: Option<String>,
    pub successful: Option<bool>,
}

impl ChartPoint {
    fn gap(date: &str) -> Self {
        Self {
            date: date.to_string(),
            value: None,
            description: None,
            successful: None,
        }
    }

    fn from_session(date: &str, session: &Session) -> Self {
        Self {
            date: date.to_string(),
            value: Some(session.value),
            description: session.description.clone(),
            successful: Some(session.successful),
        }
    }

    pub fn is_gap(&self) -> bool {
        self.value.is_none()
    }

    /// Lines shown under the value when hovering the point.
    pub fn tooltip_lines(&self) -> Vec<String> {
        match &self.description {
            Some(description) if !description.is_empty() => vec![description.clone()],
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    /// Label the series was grouped by, `Default` for unlabelled sessions.
    pub key: String,
    /// Legend text.
    pub name: String,
    pub color: &'static str,
    pub points: Vec<ChartPoint>,
    pub span_gaps: bool,
}

impl ChartSeries {
    pub fn point_color(&self, point: &ChartPoint) -> &'static str {
        match point.successful {
            Some(false) => FAILURE_COLOR,
            _ => self.color,
        }
    }

    pub fn point_colors(&self) -> Vec<&'static str> {
        self.points.iter().map(|point| self.point_color(point)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub y_axis_title: String,
    pub axis: Vec<String>,
    pub series: Vec<ChartSeries>,
}

/// Calendar day of a stored date, e.g. `2024-01-02T08:15:00.000Z` -> `2024-01-02`.
/// Bare dates pass through unchanged.
pub fn date_key(date: &str) -> &str {
    date.split('T').next().unwrap_or(date)
}

fn label_key(session: &Session) -> &str {
    match session.label.as_deref() {
        Some(label) if !label.is_empty() => label,
        _ => DEFAULT_LABEL,
    }
}

/// Group sessions by label, keeping groups in first-appearance order.
pub fn group_by_label(sessions: &[Session]) -> Vec<(String, Vec<&Session>)> {
    let mut groups: Vec<(String, Vec<&Session>)> = Vec::new();
    for session in sessions {
        let key = label_key(session);
        match groups.iter_mut().find(|(existing, _)| existing == key) {
            Some((_, members)) => members.push(session),
            None => groups.push((key.to_string(), vec![session])),
        }
    }
    groups
}

/// Sorted union of all day keys. Keys that don't parse as dates sort last.
pub fn date_axis(sessions: &[Session]) -> Vec<String> {
    let mut axis: Vec<String> = sessions
        .iter()
        .map(|session| date_key(&session.date).to_string())
        .collect();
    axis.sort_by_cached_key(|key| {
        let parsed = NaiveDate::parse_from_str(key, "%Y-%m-%d").ok();
        (parsed.is_none(), parsed, key.clone())
    });
    axis.dedup();
    axis
}

fn series_name(key: &str, workout: &Workout) -> String {
    if key == DEFAULT_LABEL {
        format!("{} {}", workout.name, workout.label_unit)
    } else {
        format!("{} {}", key, workout.label_unit)
    }
}

/// Build one series per label over a shared date axis.
///
/// Returns `None` when there is nothing to plot.
pub fn build_chart(sessions: &[Session], workout: &Workout) -> Option<ChartData> {
    if sessions.is_empty() {
        return None;
    }

    let axis = date_axis(sessions);
    let series = group_by_label(sessions)
        .into_iter()
        .enumerate()
        .map(|(index, (key, members))| {
            let points = axis
                .iter()
                .map(|day| {
                    members
                        .iter()
                        .find(|session| date_key(&session.date) == day.as_str())
                        .map(|session| ChartPoint::from_session(day, session))
                        .unwrap_or_else(|| ChartPoint::gap(day))
                })
                .collect();

            ChartSeries {
                name: series_name(&key, workout),
                key,
                color: PALETTE[index % PALETTE.len()],
                points,
                span_gaps: true,
            }
        })
        .collect();

    Some(ChartData {
        y_axis_title: workout.unit.clone(),
        axis,
        series,
    })
}
