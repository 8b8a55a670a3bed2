use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Training done outside the plan (a run, a football match...)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct ExtraActivity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExtraActivity {
    pub user_id: Uuid,
    pub name: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct LogActivityRequest {
    pub name: Option<String>,
    /// Defaults to the time of the request
    pub date: Option<DateTime<Utc>>,
}
