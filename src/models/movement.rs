//! Movement (check-out / return event) model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::enums::{Condition, EventType};

/// One check-out or return event. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Movement {
    pub id: Uuid,
    pub equipment_id: Uuid,
    /// "check_out" or "return"
    pub event_type: String,
    pub event_timestamp: DateTime<Utc>,
    /// Assignment snapshot at event time
    pub assigned_to: String,
    pub site: String,
    pub job_reference: String,
    pub notes: String,
    pub pickup_photo_url: String,
    pub return_photo_url: String,
    /// Set on check-out
    pub expected_return_date: Option<NaiveDate>,
    /// Condition reported on return
    pub return_condition: Option<String>,
    pub has_new_issues: bool,
    pub issue_description: String,
    pub requires_service: bool,
    pub requires_repair: bool,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Create movement request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateMovement {
    pub equipment_id: Uuid,
    pub event_type: EventType,
    /// Defaults to the server clock when omitted
    pub event_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assigned_to: String,
    #[serde(default)]
    pub site: String,
    #[serde(default)]
    pub job_reference: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub pickup_photo_url: String,
    #[serde(default)]
    pub return_photo_url: String,
    pub expected_return_date: Option<NaiveDate>,
    pub return_condition: Option<Condition>,
    #[serde(default)]
    pub has_new_issues: bool,
    #[serde(default)]
    pub issue_description: String,
    #[serde(default)]
    pub requires_service: bool,
    #[serde(default)]
    pub requires_repair: bool,
    #[serde(default)]
    pub created_by: String,
}
