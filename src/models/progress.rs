use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fewer points than this and no chart is drawn
pub const MIN_CHART_POINTS: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressPoint {
    pub date: DateTime<Utc>,
    /// Short axis label, e.g. "Jan 5"
    pub label: String,
    pub weight: f64,
    pub reps: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressSeries {
    pub exercise: Option<String>,
    pub points: Vec<ProgressPoint>,
    pub chartable: bool,
}

impl ProgressSeries {
    pub fn new(exercise: Option<String>, points: Vec<ProgressPoint>) -> Self {
        let chartable = points.len() >= MIN_CHART_POINTS;
        Self {
            exercise,
            points,
            chartable,
        }
    }

    pub fn empty() -> Self {
        Self::new(None, Vec::new())
    }
}

#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    pub exercise: Option<String>,
}
