//! Modelo de Vehicle
//!
//! Un vehículo del catálogo tal como vive en la colección `vehicles`.
//! Los campos desconocidos se conservan en `extra` y se devuelven sin cambios.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::record_id::RecordId;
use crate::utils::validation::{lenient_f64, lenient_u32};

/// Nombre de la colección en el store
pub const VEHICLES: &str = "vehicles";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: RecordId,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub price_per_day: Option<f64>,
    #[serde(default, deserialize_with = "lenient_u32", skip_serializing_if = "Option::is_none")]
    pub seats: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32", skip_serializing_if = "Option::is_none")]
    pub vehicles: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Vehicle {
    /// Clave de texto usada para cruzar con `Booking::vehicle_id`
    pub fn key(&self) -> String {
        self.id.key()
    }

    /// Capacidad declarada (`seats`, o `vehicles` en registros antiguos)
    pub fn capacity(&self) -> Option<u32> {
        self.seats.or(self.vehicles)
    }

    pub fn matches_type(&self, wanted: &str) -> bool {
        field_matches(self.vehicle_type.as_deref(), wanted)
    }

    pub fn matches_location(&self, wanted: &str) -> bool {
        field_matches(self.location.as_deref(), wanted)
    }

    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.brand.as_deref().unwrap_or("?"),
            self.model.as_deref().unwrap_or("?")
        )
    }
}

/// Igualdad exacta sin distinguir mayúsculas; un campo ausente nunca coincide
fn field_matches(field: Option<&str>, wanted: &str) -> bool {
    field.is_some_and(|value| value.to_lowercase() == wanted.to_lowercase())
}
