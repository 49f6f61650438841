//! Resolución de disponibilidad
//!
//! Dado un día y filtros opcionales de tipo y ubicación, calcula qué vehículos
//! del catálogo no tienen ninguna reserva ese día. Es una proyección de sólo
//! lectura: cada llamada relee el catálogo y las reservas completas.
//!
//! Pasos:
//! 1. cargar `bookings` y `vehicles`
//! 2. ids reservados para el día
//! 3. filtro por tipo (sin distinguir mayúsculas)
//! 4. filtro por ubicación (sin distinguir mayúsculas)
//! 5. excluir los reservados

use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

use crate::models::{Booking, Vehicle};
use crate::repositories::{BookingRepository, CollectionStore, VehicleRepository};
use crate::utils::errors::AppResult;
use crate::utils::validation::{format_day, normalize_filter, require_date};

/// Consulta de disponibilidad ya validada
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    /// Filtros normalizados, los que se usan para comparar
    pub vehicle_type: Option<String>,
    pub location: Option<String>,
    /// Valores tal como llegaron en la petición, para devolverlos en `filters`
    pub requested_type: Option<String>,
    pub requested_location: Option<String>,
}

impl AvailabilityQuery {
    /// Validar parámetros crudos. Falla antes de cualquier lectura del store.
    pub fn from_params(
        date: Option<&str>,
        vehicle_type: Option<&str>,
        location: Option<&str>,
    ) -> AppResult<Self> {
        Ok(Self {
            date: require_date(date, "date")?,
            vehicle_type: normalize_filter(vehicle_type),
            location: normalize_filter(location),
            requested_type: vehicle_type.map(str::to_string),
            requested_location: location.map(str::to_string),
        })
    }

    pub fn for_day(date: NaiveDate) -> Self {
        Self {
            date,
            vehicle_type: None,
            location: None,
            requested_type: None,
            requested_location: None,
        }
    }

    pub fn with_type(mut self, vehicle_type: &str) -> Self {
        self.vehicle_type = normalize_filter(Some(vehicle_type));
        self.requested_type = Some(vehicle_type.to_string());
        self
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = normalize_filter(Some(location));
        self.requested_location = Some(location.to_string());
        self
    }

    /// Pasa los filtros de tipo y ubicación
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        self.vehicle_type
            .as_deref()
            .map_or(true, |wanted| vehicle.matches_type(wanted))
            && self
                .location
                .as_deref()
                .map_or(true, |wanted| vehicle.matches_location(wanted))
    }
}

/// Resultado de una resolución, del que salen las dos formas de respuesta
#[derive(Debug, Clone, PartialEq)]
pub struct Availability {
    pub query: AvailabilityQuery,
    /// Ids reservados ese día, ordenados
    pub booked_vehicle_ids: Vec<String>,
    /// Vehículos que pasan tipo/ubicación, antes de excluir reservados
    pub total_matching: usize,
    /// Vehículos libres, en orden de catálogo
    pub available: Vec<Vehicle>,
}

impl Availability {
    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    pub fn booked_count(&self) -> usize {
        self.total_matching - self.available.len()
    }
}

/// Ids (como texto) de los vehículos con alguna reserva ese día. Las reservas
/// sin `vehicleId` o sin `date` no ocupan ningún vehículo.
pub fn booked_vehicle_ids(bookings: &[Booking], day: NaiveDate) -> BTreeSet<String> {
    bookings
        .iter()
        .filter(|booking| {
            let matches = booking.is_on(day);
            debug!(
                "Booking {} vehicle {:?} date {:?} matches {}: {}",
                booking.id, booking.vehicle_id, booking.date, day, matches
            );
            matches
        })
        .filter_map(Booking::vehicle_key)
        .collect()
}

/// Cálculo puro sobre snapshots del catálogo y las reservas
pub fn resolve(vehicles: Vec<Vehicle>, bookings: &[Booking], query: AvailabilityQuery) -> Availability {
    let booked = booked_vehicle_ids(bookings, query.date);
    let catalog_size = vehicles.len();

    let matching: Vec<Vehicle> = vehicles
        .into_iter()
        .filter(|vehicle| query.matches(vehicle))
        .collect();
    debug!(
        "Filtered by type {:?} / location {:?}: {} -> {} vehicles",
        query.vehicle_type,
        query.location,
        catalog_size,
        matching.len()
    );

    let total_matching = matching.len();
    let available: Vec<Vehicle> = matching
        .into_iter()
        .filter(|vehicle| {
            let is_available = !booked.contains(&vehicle.key());
            debug!(
                "Vehicle {} ({}): {}",
                vehicle.id,
                vehicle.display_name(),
                if is_available { "AVAILABLE" } else { "BOOKED" }
            );
            is_available
        })
        .collect();

    Availability {
        query,
        booked_vehicle_ids: booked.into_iter().collect(),
        total_matching,
        available,
    }
}

/// Servicio que alimenta `resolve` desde el collection store
#[derive(Clone)]
pub struct AvailabilityService {
    vehicles: VehicleRepository,
    bookings: BookingRepository,
}

impl AvailabilityService {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self {
            vehicles: VehicleRepository::new(store.clone()),
            bookings: BookingRepository::new(store),
        }
    }

    pub async fn resolve_availability(&self, query: AvailabilityQuery) -> AppResult<Availability> {
        let day = format_day(query.date);
        info!("🔎 Availability check for {}", day);

        // Dos lecturas independientes: se acepta que no formen un snapshot común
        let (bookings, vehicles) =
            futures::future::try_join(self.bookings.find_all(), self.vehicles.find_all()).await?;
        debug!(
            "Total vehicles in store: {}, total bookings: {}",
            vehicles.len(),
            bookings.len()
        );

        let availability = resolve(vehicles, &bookings, query);
        info!(
            "✅ {} available of {} matching on {} ({} booked ids)",
            availability.available_count(),
            availability.total_matching,
            day,
            availability.booked_vehicle_ids.len()
        );

        Ok(availability)
    }
}
