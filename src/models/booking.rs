//! Modelo de Booking
//!
//! Una reserva de un vehículo para un día. La fecha se guarda como texto
//! `YYYY-MM-DD`; sólo una fecha canónica puede coincidir con una consulta.
//! Las reservas por rango (`startDate`/`endDate`) no llevan `date` y nunca
//! ocupan un día concreto.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::record_id::RecordId;
use crate::utils::validation::parse_calendar_day;

/// Nombre de la colección en el store
pub const BOOKINGS: &str = "bookings";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Booking {
    /// Día reservado, si la fecha almacenada es canónica
    pub fn day(&self) -> Option<NaiveDate> {
        self.date
            .as_deref()
            .and_then(|date| parse_calendar_day(date).ok())
    }

    /// Clave del vehículo reservado, si el registro la tiene
    pub fn vehicle_key(&self) -> Option<String> {
        self.vehicle_id.as_ref().map(RecordId::key)
    }

    pub fn is_on(&self, day: NaiveDate) -> bool {
        self.day() == Some(day)
    }

    /// Misma reserva de vehículo y día
    pub fn collides_with(&self, vehicle_key: &str, day: NaiveDate) -> bool {
        self.vehicle_key().as_deref() == Some(vehicle_key) && self.is_on(day)
    }
}
