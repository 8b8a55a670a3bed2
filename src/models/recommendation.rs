use serde::{Deserialize, Serialize};

/// Payload for the recommendation agent. The three blobs carry the same
/// serialized log history under the names the agent expects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationInput {
    pub progress_data: String,
    pub consistency_data: String,
    pub training_patterns: String,
}

impl RecommendationInput {
    pub fn from_history(history_json: String) -> Self {
        Self {
            progress_data: history_json.clone(),
            consistency_data: history_json.clone(),
            training_patterns: history_json,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationSet {
    pub recommendations: Vec<String>,
    pub analyzed_logs: usize,
    /// Informational text when the agent had nothing to suggest
    pub message: Option<String>,
}
