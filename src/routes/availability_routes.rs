use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::availability_controller::AvailabilityController;
use crate::dto::availability_dto::{
    AvailabilityListResponse, AvailabilityParams, AvailabilitySummaryResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// `/vehicles/availability` debe registrarse junto a `/vehicles/:id`; el
/// segmento estático tiene prioridad sobre el parámetro.
pub fn create_availability_router() -> Router<AppState> {
    Router::new()
        .route("/available-vehicles", get(list_available_vehicles))
        .route("/vehicles/availability", get(availability_summary))
}

async fn list_available_vehicles(
    State(state): State<AppState>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Json<AvailabilityListResponse>, AppError> {
    let controller = AvailabilityController::new(state.availability.clone());
    let response = controller.list(params).await?;
    Ok(Json(response))
}

async fn availability_summary(
    State(state): State<AppState>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Json<AvailabilitySummaryResponse>, AppError> {
    let controller = AvailabilityController::new(state.availability.clone());
    let response = controller.summary(params).await?;
    Ok(Json(response))
}
