use serde_json::{json, Value};

use crate::models::RecommendationInput;

pub const PLAN_EXTRACTION_INSTRUCTION: &str = "\
You are a personal trainer reading a training plan spreadsheet.

1. Identify every training day in the plan (for example \"Día 1\", \"Día 2\").
2. For each day, list its exercises in the order they appear.
3. Remove sets and repetitions from exercise names (\"Sentadillas 3x10\" becomes \"Sentadillas\").
4. Fix misspelled exercise names and keep them in the language of the plan.
5. Write every exercise name in Title Case.
6. Report how many training days you found in numberOfTrainingDays.

Answer only with JSON matching the response schema.";

pub fn plan_extraction_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "numberOfTrainingDays": { "type": "INTEGER" },
            "exercisesByDay": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "day": { "type": "STRING" },
                        "exercises": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" }
                        }
                    },
                    "required": ["day", "exercises"]
                }
            }
        },
        "required": ["numberOfTrainingDays", "exercisesByDay"]
    })
}

pub fn recommendation_prompt(input: &RecommendationInput) -> String {
    format!(
        "You are a personal fitness coach analyzing a user's workout history to give \
personalized training recommendations.

Progress data: {}
Consistency data: {}
Training patterns: {}

Consider progress on each exercise (weight and reps over time), how consistently the \
user trains, and which exercises or muscle groups dominate. Point out what is going \
well and what needs work, and suggest concrete adjustments such as added volume or \
new exercises for weak areas.

Answer only with JSON matching the response schema. Return an empty list if there \
is nothing useful to suggest.",
        input.progress_data, input.consistency_data, input.training_patterns
    )
}

pub fn recommendation_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "recommendations": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        },
        "required": ["recommendations"]
    })
}
