//! Equipment registry endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::FilterBucket,
        equipment::{CreateEquipment, EnrichedEquipment, UpdateEquipment},
        import_report::ImportReport,
    },
    services::inventory,
};

/// Query parameters for the equipment list
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct EquipmentQuery {
    /// Status/tag bucket to narrow to (e.g. "Available", "Overdue", "Due Soon")
    pub bucket: Option<FilterBucket>,
    /// Free-text search across name, asset id, category, assignee and site
    pub q: Option<String>,
}

/// List equipment with derived status and tag state
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    params(EquipmentQuery),
    responses(
        (status = 200, description = "Equipment list", body = Vec<EnrichedEquipment>),
        (status = 504, description = "Registry read timed out")
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
    Query(query): Query<EquipmentQuery>,
) -> AppResult<Json<Vec<EnrichedEquipment>>> {
    let mut records = state.services.inventory.equipment().await?;

    if let Some(bucket) = query.bucket {
        records = inventory::filter_by_bucket(&records, bucket);
    }
    if let Some(ref q) = query.q {
        records = inventory::search_records(&records, q);
    }

    Ok(Json(records))
}

/// Get one equipment record by ID
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    params(
        ("id" = Uuid, Path, description = "Equipment ID")
    ),
    responses(
        (status = 200, description = "Equipment details", body = EnrichedEquipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<EnrichedEquipment>> {
    let record = state.services.equipment.get_by_id(id).await?;
    Ok(Json(record))
}

/// Register a new piece of equipment
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = EnrichedEquipment),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Asset ID already registered")
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<EnrichedEquipment>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let record = state.services.equipment.create(&request).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Update an equipment record
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    tag = "equipment",
    params(
        ("id" = Uuid, Path, description = "Equipment ID")
    ),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = EnrichedEquipment),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateEquipment>,
) -> AppResult<Json<EnrichedEquipment>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let record = state.services.equipment.update(id, &request).await?;
    Ok(Json(record))
}

/// Bulk import equipment from CSV
///
/// The body is raw CSV text with a header row. Rows failing validation or
/// duplicating an existing asset id are skipped and itemized in the report.
#[utoipa::path(
    post,
    path = "/equipment/import",
    tag = "equipment",
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = 200, description = "Import report", body = ImportReport),
        (status = 400, description = "Empty or unparseable CSV body")
    )
)]
pub async fn import_equipment(
    State(state): State<crate::AppState>,
    body: String,
) -> AppResult<Json<ImportReport>> {
    let report = state.services.equipment.import_csv(&body).await?;
    Ok(Json(report))
}
