use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::models::RecordId;
use crate::utils::validation::{lenient_f64, lenient_u32};

// Request para crear o reemplazar un vehículo
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,

    #[serde(rename = "type")]
    #[validate(required, length(min = 1, message = "type cannot be empty"))]
    pub vehicle_type: Option<String>,

    #[validate(required, length(min = 1, message = "location cannot be empty"))]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "pricePerDay cannot be negative"))]
    pub price_per_day: Option<f64>,

    #[serde(default, deserialize_with = "lenient_u32", skip_serializing_if = "Option::is_none")]
    pub seats: Option<u32>,

    #[serde(default, deserialize_with = "lenient_u32", skip_serializing_if = "Option::is_none")]
    pub vehicles: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// Filtros exactos de GET /vehicles (como json-server)
#[derive(Debug, Default, Deserialize)]
pub struct VehicleFilters {
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    pub location: Option<String>,
}
