use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::RecordId;

// Request para crear una reserva; el resto de campos (startDate, seats,
// totalPrice...) se guardan tal cual
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub vehicle_id: Option<RecordId>,
    pub date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// Filtros de GET /bookings
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFilters {
    pub vehicle_id: Option<String>,
    pub date: Option<String>,
}

// Query de GET /vehicles/:id/quote
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub seats: Option<u32>,
}

// Response de presupuesto
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingQuote {
    pub vehicle_id: RecordId,
    pub start_date: String,
    pub end_date: String,
    pub total_days: i64,
    pub price_per_day: f64,
    pub total_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats: Option<u32>,
}
