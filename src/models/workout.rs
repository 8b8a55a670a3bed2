use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// A weight or reps field as typed by the user: either a JSON number or the raw text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum EnteredValue {
    Number(f64),
    Text(String),
}

impl EnteredValue {
    fn is_blank(&self) -> bool {
        matches!(self, EnteredValue::Text(text) if text.trim().is_empty())
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            EnteredValue::Number(value) => Some(*value),
            EnteredValue::Text(text) => text.trim().replace(',', ".").parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CompleteExerciseRequest {
    pub exercise_name: String,
    pub weight: Option<EnteredValue>,
    pub reps: Option<EnteredValue>,
}

impl CompleteExerciseRequest {
    /// Both fields must be filled in; returns the parsed (weight, reps)
    pub fn validate(&self) -> Result<(f64, i32), AppError> {
        if self.exercise_name.trim().is_empty() {
            return Err(AppError::validation("Exercise name is required."));
        }

        let (weight, reps) = match (&self.weight, &self.reps) {
            (Some(weight), Some(reps)) if !weight.is_blank() && !reps.is_blank() => (weight, reps),
            _ => return Err(AppError::validation("Please enter weight and reps.")),
        };

        let weight = weight
            .as_f64()
            .filter(|w| w.is_finite() && *w >= 0.0)
            .ok_or_else(|| AppError::validation("Weight must be a non-negative number."))?;

        let reps = reps
            .as_f64()
            .filter(|r| r.is_finite() && *r >= 1.0 && *r <= i32::MAX as f64)
            .map(|r| r.trunc() as i32)
            .ok_or_else(|| AppError::validation("Reps must be a positive whole number."))?;

        Ok((weight, reps))
    }
}

/// Exercises of one plan day as presented for a workout
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutDay {
    pub plan_id: Uuid,
    pub plan_name: String,
    pub day: String,
    pub title: String,
    /// Label as stored in the plan, `None` when the day does not exist
    pub day_label: Option<String>,
    pub exercises: Vec<WorkoutExercise>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WorkoutExercise {
    pub name: String,
    /// Heaviest weight ever logged for this exercise, across all plans
    pub max_weight: Option<f64>,
    pub completed_this_week: bool,
    pub last_completed_at: Option<DateTime<Utc>>,
}
