//! Services module
//!
//! Lógica de negocio: resolución de disponibilidad, reservas y autenticación.
//! Los servicios sólo dependen del trait `CollectionStore`.

pub mod auth_service;
pub mod availability_service;
pub mod booking_service;

pub use auth_service::AuthService;
pub use availability_service::{Availability, AvailabilityQuery, AvailabilityService};
pub use booking_service::BookingService;
