use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

use super::day_label::{compare_day_labels, day_keys_match, normalize_day_key};

/// Day label -> ordered exercise names
pub type ExercisesByDay = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainingPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_active: bool,
    pub exercises_by_day: ExercisesByDay,
    pub number_of_days: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTrainingPlan {
    pub user_id: Uuid,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub exercises_by_day: ExercisesByDay,
    pub number_of_days: i32,
}

impl TrainingPlan {
    /// Stored label and exercises of the day matching `requested`
    pub fn find_day(&self, requested: &str) -> Option<(&str, &[String])> {
        self.exercises_by_day
            .iter()
            .find(|(label, _)| day_keys_match(label, requested))
            .map(|(label, exercises)| (label.as_str(), exercises.as_slice()))
    }

    pub fn ordered_days(&self) -> Vec<PlanDay> {
        let mut days: Vec<PlanDay> = self
            .exercises_by_day
            .iter()
            .map(|(label, exercises)| PlanDay {
                label: label.clone(),
                slug: normalize_day_key(label),
                exercise_count: exercises.len(),
            })
            .collect();

        days.sort_by(|a, b| compare_day_labels(&a.label, &b.label));
        days
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanDay {
    pub label: String,
    pub slug: String,
    pub exercise_count: usize,
}

#[derive(Debug, Serialize)]
pub struct PlanSummary {
    pub plan: TrainingPlan,
    pub days: Vec<PlanDay>,
}

impl From<TrainingPlan> for PlanSummary {
    fn from(plan: TrainingPlan) -> Self {
        let days = plan.ordered_days();
        Self { plan, days }
    }
}

/// Structured response of the extraction agent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanExtraction {
    pub number_of_training_days: u32,
    pub exercises_by_day: Vec<ExtractedDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractedDay {
    pub day: String,
    pub exercises: Vec<String>,
}

/// Extraction after local clean-up, ready to become a plan
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedExtraction {
    pub exercises_by_day: ExercisesByDay,
    pub number_of_days: i32,
    pub reported_days: u32,
}

impl PlanExtraction {
    /// Clean exercise names, merge days sharing a day key and drop empty
    /// days. The first label seen for a key is the one stored.
    /// Returns `None` when nothing usable is left.
    pub fn clean(self) -> Option<CleanedExtraction> {
        let reported_days = self.number_of_training_days;
        let mut exercises_by_day = ExercisesByDay::new();
        let mut labels_by_key: HashMap<String, String> = HashMap::new();

        for extracted in self.exercises_by_day {
            let label = collapse_whitespace(&extracted.day);
            let key = normalize_day_key(&label);
            if key.is_empty() {
                continue;
            }

            let exercises: Vec<String> = extracted
                .exercises
                .iter()
                .map(|name| clean_exercise_name(name))
                .filter(|name| !name.is_empty())
                .collect();

            if exercises.is_empty() {
                continue;
            }

            let label = labels_by_key.entry(key).or_insert(label).clone();
            exercises_by_day.entry(label).or_default().extend(exercises);
        }

        if exercises_by_day.is_empty() {
            return None;
        }

        Some(CleanedExtraction {
            number_of_days: exercises_by_day.len() as i32,
            exercises_by_day,
            reported_days,
        })
    }
}

static LEADING_SETS_REPS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*\d+\s*[x×]\s*\d+\S*\s+").expect("valid regex"));
static TRAILING_SETS_REPS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[\s:(\[-]*\d+\s*[x×]\s*\d+.*$").expect("valid regex"));
static TRAILING_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s:,;(\[-]+$").expect("valid regex"));

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// "sentadillas 3x10" -> "Sentadillas", "press banca 4 x 8-10" -> "Press Banca"
pub fn clean_exercise_name(raw: &str) -> String {
    let name = LEADING_SETS_REPS.replace(raw, "");
    let name = TRAILING_SETS_REPS.replace(&name, "");
    let name = TRAILING_PUNCTUATION.replace(&name, "");

    name.split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}
