use bytes::Bytes;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::agents::{AgentError, EncodedFile, PlanExtractor};
use crate::errors::{AppError, AppResult};
use crate::models::{NewTrainingPlan, TrainingPlan};
use crate::store::TrainingStore;

/// Plan name and spreadsheet as received from the import form
#[derive(Debug, Clone, Default)]
pub struct PlanUpload {
    pub name: Option<String>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Option<Bytes>,
}

pub struct PlanImportService {
    store: Arc<dyn TrainingStore>,
    extractor: Arc<dyn PlanExtractor>,
    validity: Duration,
}

impl PlanImportService {
    pub fn new(
        store: Arc<dyn TrainingStore>,
        extractor: Arc<dyn PlanExtractor>,
        validity_days: i64,
    ) -> Self {
        Self {
            store,
            extractor,
            validity: Duration::days(validity_days),
        }
    }

    /// Extract the plan from the uploaded file and make it the user's only
    /// active plan. Nothing is written unless extraction succeeds.
    #[tracing::instrument(skip(self, upload), fields(user_id = %user_id))]
    pub async fn import_plan(&self, user_id: Uuid, upload: PlanUpload) -> AppResult<TrainingPlan> {
        let name = upload
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        let (name, data) = match (name, upload.data) {
            (Some(name), Some(data)) if !data.is_empty() => (name, data),
            _ => {
                return Err(AppError::validation(
                    "Please provide a plan name and select a file.",
                ))
            }
        };

        let file = EncodedFile::encode(
            &data,
            upload.file_name.as_deref(),
            upload.content_type.as_deref(),
        );

        let extraction = self.extractor.extract_plan(&file).await?;
        let cleaned = extraction.clean().ok_or_else(|| {
            AgentError::Malformed("no training days with exercises were found".to_string())
        })?;

        if cleaned.reported_days as i32 != cleaned.number_of_days {
            warn!(
                reported = cleaned.reported_days,
                found = cleaned.number_of_days,
                "extraction day count differs from extracted days"
            );
        }

        let now = Utc::now();
        let plan = self
            .store
            .replace_active_plan(NewTrainingPlan {
                user_id,
                name,
                start_date: now,
                end_date: now + self.validity,
                exercises_by_day: cleaned.exercises_by_day,
                number_of_days: cleaned.number_of_days,
            })
            .await?;

        info!(plan_id = %plan.id, days = plan.number_of_days, "training plan imported");
        Ok(plan)
    }
}
