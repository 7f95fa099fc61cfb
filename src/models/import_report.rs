//! CSV import report models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome of one CSV row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImportAction {
    Created,
    Skipped,
}

/// Per-row result within an import report.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImportRowResult {
    /// 1-based data row number (header excluded)
    pub row: usize,
    pub asset_id: String,
    pub name: String,
    pub action: ImportAction,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Report returned after a CSV import.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImportReport {
    pub total_rows: usize,
    pub created: usize,
    pub skipped: usize,
    pub rows: Vec<ImportRowResult>,
}
