//! Dashboard statistics endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, services::inventory};

/// Dashboard counters rolled up from one registry snapshot.
///
/// The four status counters partition the registry, so
/// `available + in_use + overdue + repair == total`. The two tag counters
/// are independent of status.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardStats {
    /// Total number of equipment records
    pub total: i64,
    /// Items currently available
    pub available: i64,
    /// Items checked out and not yet due back
    pub in_use: i64,
    /// Items checked out past their expected return date
    pub overdue: i64,
    /// Items in repair
    pub repair: i64,
    /// Items whose test tag has expired
    pub expired_tags: i64,
    /// Items whose test tag is due within their threshold
    pub due_soon: i64,
}

/// Get dashboard statistics
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStats),
        (status = 504, description = "Registry read timed out")
    )
)]
pub async fn get_stats(
    State(state): State<crate::AppState>,
) -> AppResult<Json<DashboardStats>> {
    let snapshot = state.services.inventory.snapshot().await?;
    Ok(Json(inventory::compute_stats(&snapshot.equipment)))
}
