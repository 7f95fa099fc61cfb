//! Movement log endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::movement::{CreateMovement, Movement},
};

/// Get the full movement log, newest first
#[utoipa::path(
    get,
    path = "/movements",
    tag = "movements",
    responses(
        (status = 200, description = "Movement log", body = Vec<Movement>)
    )
)]
pub async fn list_movements(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Movement>>> {
    let movements = state.services.movements.list().await?;
    Ok(Json(movements))
}

/// Get the movement history of one equipment item
#[utoipa::path(
    get,
    path = "/equipment/{id}/movements",
    tag = "movements",
    params(
        ("id" = Uuid, Path, description = "Equipment ID")
    ),
    responses(
        (status = 200, description = "Movement history, newest first", body = Vec<Movement>),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn list_equipment_movements(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<Movement>>> {
    let movements = state.services.movements.list_for_equipment(id).await?;
    Ok(Json(movements))
}

/// Record a check-out or return
///
/// The movement row and the equipment fields it implies are written in one
/// transaction; a rejected movement leaves the equipment untouched.
#[utoipa::path(
    post,
    path = "/movements",
    tag = "movements",
    request_body = CreateMovement,
    responses(
        (status = 201, description = "Movement recorded", body = Movement),
        (status = 400, description = "Missing required fields for the event type"),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn create_movement(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateMovement>,
) -> AppResult<(StatusCode, Json<Movement>)> {
    let movement = state.services.movements.record(request).await?;
    Ok((StatusCode::CREATED, Json(movement)))
}
