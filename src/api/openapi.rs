//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{equipment, health, movements, stats};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gearlog API",
        version = "1.0.0",
        description = "Equipment Tracking System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::import_equipment,
        // Movements
        movements::list_movements,
        movements::list_equipment_movements,
        movements::create_movement,
        // Stats
        stats::get_stats,
    ),
    components(
        schemas(
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::EnrichedEquipment,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            // Movements
            crate::models::movement::Movement,
            crate::models::movement::CreateMovement,
            // Import
            crate::models::import_report::ImportReport,
            crate::models::import_report::ImportRowResult,
            crate::models::import_report::ImportAction,
            // Enums
            crate::models::enums::CanonicalStatus,
            crate::models::enums::TagState,
            crate::models::enums::Condition,
            crate::models::enums::EventType,
            crate::models::enums::FilterBucket,
            // Stats
            stats::DashboardStats,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "equipment", description = "Equipment registry management"),
        (name = "movements", description = "Check-out and return log"),
        (name = "stats", description = "Dashboard statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
