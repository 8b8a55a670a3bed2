//! Hosted AI agents: plan extraction from an uploaded spreadsheet and
//! training recommendations from the exercise history.

pub mod gemini;
pub mod prompts;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use crate::models::{PlanExtraction, RecommendationInput};

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const XLS_MIME: &str = "application/vnd.ms-excel";

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Agent is not configured: {0}")]
    NotConfigured(String),
    #[error("Request to agent failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Agent returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Agent returned an unusable response: {0}")]
    Malformed(String),
}

/// Uploaded file ready to be sent inline to an agent
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedFile {
    pub file_name: Option<String>,
    pub mime_type: String,
    pub data_base64: String,
}

impl EncodedFile {
    pub fn encode(bytes: &[u8], file_name: Option<&str>, content_type: Option<&str>) -> Self {
        Self {
            file_name: file_name.map(str::to_string),
            mime_type: resolve_mime_type(file_name, content_type),
            data_base64: STANDARD.encode(bytes),
        }
    }
}

/// Trust the declared content type unless it is missing or generic, then fall
/// back to the file extension. Spreadsheets are the expected upload.
fn resolve_mime_type(file_name: Option<&str>, content_type: Option<&str>) -> String {
    let declared = content_type
        .and_then(|value| value.parse::<mime::Mime>().ok())
        .filter(|parsed| *parsed != mime::APPLICATION_OCTET_STREAM);

    if let Some(parsed) = declared {
        return parsed.essence_str().to_string();
    }

    let extension = file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_lowercase());

    match extension.as_deref() {
        Some("xls") => XLS_MIME.to_string(),
        Some("csv") => mime::TEXT_CSV.essence_str().to_string(),
        _ => XLSX_MIME.to_string(),
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlanExtractor: Send + Sync {
    /// Training days and exercises found in the file
    async fn extract_plan(&self, file: &EncodedFile) -> Result<PlanExtraction, AgentError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecommendationAgent: Send + Sync {
    /// Free-text suggestions; an empty list is a valid answer
    async fn recommend(&self, input: &RecommendationInput) -> Result<Vec<String>, AgentError>;
}
