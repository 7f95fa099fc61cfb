//! Equipment model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::enums::{CanonicalStatus, Condition, TagState};

/// Equipment record as stored.
///
/// `current_status` and `condition` stay raw strings: old rows carry legacy
/// values ("Maintenance", "Not Working") and the stored status is only a
/// hint — the canonical status is recomputed on every read.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: Uuid,
    /// Human-readable asset identifier (unique, user-visible)
    pub asset_id: String,
    /// Scannable code printed on the asset label
    pub qr_code: String,
    pub name: String,
    pub category: String,
    pub condition: String,
    pub notes: String,
    pub photo_url: String,
    /// Date of the last compliance test
    pub test_tag_done_date: Option<NaiveDate>,
    /// Date the next compliance test falls due
    pub test_tag_next_due: Option<NaiveDate>,
    /// Days before the due date at which the tag is flagged "Due Soon"
    pub tag_threshold_days: i32,
    /// Stored lifecycle status hint; never trusted without derivation
    pub current_status: String,
    pub assigned_to: String,
    pub assigned_site: String,
    pub assigned_job: String,
    /// Only meaningful while the item is assigned
    pub expected_return_date: Option<NaiveDate>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Equipment enriched with the derived status and tag state.
///
/// Derivation happens once per snapshot read; filters and stats reuse these
/// values instead of recomputing the date math.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EnrichedEquipment {
    #[serde(flatten)]
    pub record: Equipment,
    /// Canonical lifecycle status (read-time truth)
    pub derived_status: CanonicalStatus,
    /// Compliance tag state
    pub derived_tag: TagState,
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, message = "asset_id must not be empty"))]
    pub asset_id: String,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub qr_code: Option<String>,
    pub category: Option<String>,
    pub condition: Option<Condition>,
    pub notes: Option<String>,
    pub photo_url: Option<String>,
    pub test_tag_done_date: Option<NaiveDate>,
    pub test_tag_next_due: Option<NaiveDate>,
    #[validate(range(min = 0, message = "tag_threshold_days must be non-negative"))]
    pub tag_threshold_days: Option<i32>,
    pub created_by: Option<String>,
}

/// Update equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub qr_code: Option<String>,
    pub category: Option<String>,
    pub condition: Option<Condition>,
    pub notes: Option<String>,
    pub photo_url: Option<String>,
    pub test_tag_done_date: Option<NaiveDate>,
    pub test_tag_next_due: Option<NaiveDate>,
    #[validate(range(min = 0, message = "tag_threshold_days must be non-negative"))]
    pub tag_threshold_days: Option<i32>,
    pub current_status: Option<CanonicalStatus>,
}

/// Field updates a movement implies on its equipment record.
///
/// Pure projection, computed before any write is issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct EquipmentUpdate {
    pub current_status: CanonicalStatus,
    pub assigned_to: String,
    pub assigned_site: String,
    pub assigned_job: String,
    pub expected_return_date: Option<NaiveDate>,
}
