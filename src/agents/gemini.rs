use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, instrument};

use super::prompts::{
    plan_extraction_schema, recommendation_prompt, recommendation_schema,
    PLAN_EXTRACTION_INSTRUCTION,
};
use super::{AgentError, EncodedFile, PlanExtractor, RecommendationAgent};
use crate::config::AgentConfig;
use crate::models::{PlanExtraction, RecommendationInput};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct RecommendationResponse {
    #[serde(default)]
    recommendations: Vec<String>,
}

/// Gemini `generateContent` client with structured JSON output
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl GeminiClient {
    pub fn new(config: &AgentConfig) -> Result<Self, AgentError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.clone(),
        })
    }

    fn build_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    async fn generate<T: DeserializeOwned>(
        &self,
        parts: Vec<Part>,
        response_schema: Value,
    ) -> Result<T, AgentError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AgentError::NotConfigured("GEMINI_API_KEY is not set".to_string()))?;

        let request = GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            generation_config: GenerationConfig {
                temperature: 0.2,
                response_mime_type: "application/json",
                response_schema,
            },
        };

        let response = self
            .client
            .post(self.build_url())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &body));
        }

        let parsed: GenerateResponse = serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "Failed to parse Gemini response");
            AgentError::Malformed(format!("invalid response envelope: {e}"))
        })?;

        if let Some(api_error) = parsed.error {
            return Err(AgentError::Malformed(api_error.message));
        }

        let text = Self::extract_text(&parsed)?;
        debug!(bytes = text.len(), "Gemini returned structured output");

        serde_json::from_str(strip_code_fence(&text))
            .map_err(|e| AgentError::Malformed(format!("output does not match schema: {e}")))
    }

    /// Concatenated text parts of the first candidate
    fn extract_text(response: &GenerateResponse) -> Result<String, AgentError> {
        let parts = response
            .candidates
            .as_ref()
            .and_then(|candidates| candidates.first())
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| content.parts.as_slice())
            .unwrap_or_default();

        let text: String = parts
            .iter()
            .filter_map(|part| match part {
                Part::Text { text } => Some(text.as_str()),
                Part::InlineData { .. } => None,
            })
            .collect();

        if text.trim().is_empty() {
            return Err(AgentError::Malformed("no content in response".to_string()));
        }
        Ok(text)
    }

    fn map_api_error(status: u16, body: &str) -> AgentError {
        let message = serde_json::from_str::<GenerateResponse>(body)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| body.to_string(), |e| e.message);

        AgentError::Status {
            status,
            body: message,
        }
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

#[async_trait]
impl PlanExtractor for GeminiClient {
    #[instrument(skip_all, fields(mime = %file.mime_type, file = ?file.file_name))]
    async fn extract_plan(&self, file: &EncodedFile) -> Result<PlanExtraction, AgentError> {
        let parts = vec![
            Part::Text {
                text: PLAN_EXTRACTION_INSTRUCTION.to_string(),
            },
            Part::InlineData {
                inline_data: InlineData {
                    mime_type: file.mime_type.clone(),
                    data: file.data_base64.clone(),
                },
            },
        ];

        self.generate(parts, plan_extraction_schema()).await
    }
}

#[async_trait]
impl RecommendationAgent for GeminiClient {
    #[instrument(skip_all)]
    async fn recommend(&self, input: &RecommendationInput) -> Result<Vec<String>, AgentError> {
        let parts = vec![Part::Text {
            text: recommendation_prompt(input),
        }];

        let response: RecommendationResponse =
            self.generate(parts, recommendation_schema()).await?;

        Ok(response
            .recommendations
            .into_iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect())
    }
}
