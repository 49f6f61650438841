//! Servicio de reservas
//!
//! Alta de reservas con comprobación atómica de disponibilidad y cálculo de
//! presupuestos de alquiler.

use chrono::NaiveDate;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::dto::booking_dto::{BookingQuote, CreateBookingRequest};
use crate::models::{Booking, Vehicle};
use crate::repositories::{BookingRepository, CollectionStore, VehicleRepository};
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation::{format_day, parse_calendar_day};

#[derive(Clone)]
pub struct BookingService {
    vehicles: VehicleRepository,
    bookings: BookingRepository,
}

impl BookingService {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self {
            vehicles: VehicleRepository::new(store.clone()),
            bookings: BookingRepository::new(store),
        }
    }

    /// Crear una reserva si el vehículo está libre ese día.
    ///
    /// La comprobación y la inserción ocurren en un solo paso del store, así
    /// que dos peticiones simultáneas no pueden reservar el mismo vehículo.
    pub async fn create(&self, request: CreateBookingRequest) -> AppResult<Booking> {
        let vehicle_id = request
            .vehicle_id
            .ok_or_else(|| AppError::BadRequest("Field 'vehicleId' is required".to_string()))?;
        let raw_date = request
            .date
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| AppError::BadRequest("Field 'date' is required (YYYY-MM-DD)".to_string()))?;
        let day = parse_calendar_day(raw_date).map_err(|_| {
            AppError::BadRequest(format!("Invalid date '{}': expected YYYY-MM-DD", raw_date))
        })?;

        let vehicle_key = vehicle_id.key();
        if self.vehicles.find_by_id(&vehicle_key).await?.is_none() {
            return Err(not_found_error("Vehicle", &vehicle_key));
        }

        let mut record = request.extra;
        record.insert("vehicleId".to_string(), vehicle_id.to_json());
        record.insert("date".to_string(), Value::from(format_day(day)));

        match self.bookings.reserve(&vehicle_key, day, Value::Object(record)).await? {
            Some(booking) => {
                info!("📅 Booking {} created for vehicle {} on {}", booking.id, vehicle_key, day);
                Ok(booking)
            }
            None => {
                warn!("⛔ Vehicle {} already booked on {}", vehicle_key, day);
                Err(AppError::Conflict(format!(
                    "Vehicle '{}' is already booked on {}",
                    vehicle_key,
                    format_day(day)
                )))
            }
        }
    }

    pub async fn quote_for(
        &self,
        vehicle_id: &str,
        start: NaiveDate,
        end: NaiveDate,
        seats: Option<u32>,
    ) -> AppResult<BookingQuote> {
        let vehicle = self
            .vehicles
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", vehicle_id))?;

        quote(&vehicle, start, end, seats)
    }
}

/// Presupuesto: días × tarifa diaria. Recoger y devolver el mismo día cuenta
/// como un día.
pub fn quote(vehicle: &Vehicle, start: NaiveDate, end: NaiveDate, seats: Option<u32>) -> AppResult<BookingQuote> {
    let span = (end - start).num_days();
    if span < 0 {
        return Err(AppError::BadRequest(
            "End date must be the same or after start date".to_string(),
        ));
    }

    if let Some(requested) = seats {
        let max_seats = vehicle.capacity().unwrap_or(0);
        if requested == 0 || requested > max_seats {
            return Err(AppError::BadRequest(format!(
                "Seats must be between 1 and {}",
                max_seats
            )));
        }
    }

    let total_days = span.max(1);
    let price_per_day = vehicle.price_per_day.unwrap_or(0.0);

    Ok(BookingQuote {
        vehicle_id: vehicle.id.clone(),
        start_date: format_day(start),
        end_date: format_day(end),
        total_days,
        price_per_day,
        total_price: price_per_day * total_days as f64,
        seats,
    })
}
