//! Shared application state
//!
//! Estado compartido que se pasa a través del router de Axum. Todo lo que hay
//! aquí es inmutable; el único estado mutable vive en el collection store.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::{BookingRepository, CollectionStore, VehicleRepository};
use crate::services::{AuthService, AvailabilityService, BookingService};
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub store: Arc<dyn CollectionStore>,
    pub jwt: JwtConfig,
    pub availability: AvailabilityService,
    pub bookings: BookingService,
    pub auth: AuthService,
    pub vehicle_repository: VehicleRepository,
    pub booking_repository: BookingRepository,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, store: Arc<dyn CollectionStore>) -> Self {
        let jwt = JwtConfig::from(&config);

        Self {
            availability: AvailabilityService::new(store.clone()),
            bookings: BookingService::new(store.clone()),
            auth: AuthService::new(store.clone(), jwt.clone(), config.bcrypt_cost),
            vehicle_repository: VehicleRepository::new(store.clone()),
            booking_repository: BookingRepository::new(store.clone()),
            jwt,
            config,
            store,
        }
    }
}
