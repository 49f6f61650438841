use serde::{Deserialize, Serialize};

use crate::models::Vehicle;

// Query de los dos endpoints de disponibilidad
#[derive(Debug, Default, Deserialize)]
pub struct AvailabilityParams {
    pub date: Option<String>,
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    pub location: Option<String>,
}

// Filtros devueltos tal como se aplicaron; los ausentes se omiten
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AppliedFilters {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

// Forma lista: el inventario disponible
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityListResponse {
    pub success: bool,
    pub count: usize,
    pub date: String,
    pub filters: AppliedFilters,
    pub booked_vehicle_ids: Vec<String>,
    pub total_matching_type_location: usize,
    pub vehicles: Vec<Vehicle>,
}

// Forma resumen: cifras agregadas más la lista disponible
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySummaryResponse {
    pub success: bool,
    pub date: String,
    pub filters: AppliedFilters,
    pub total: usize,
    pub available: usize,
    pub booked: usize,
    pub available_vehicles: Vec<Vehicle>,
}
