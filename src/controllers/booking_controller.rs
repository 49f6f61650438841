use crate::dto::booking_dto::{BookingFilters, CreateBookingRequest};
use crate::models::Booking;
use crate::repositories::BookingRepository;
use crate::services::BookingService;
use crate::utils::errors::{not_found_error, AppResult};

pub struct BookingController {
    repository: BookingRepository,
    service: BookingService,
}

impl BookingController {
    pub fn new(repository: BookingRepository, service: BookingService) -> Self {
        Self {
            repository,
            service,
        }
    }

    pub async fn create(&self, request: CreateBookingRequest) -> AppResult<Booking> {
        self.service.create(request).await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Booking> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Booking", id))
    }

    pub async fn list(&self, filters: BookingFilters) -> AppResult<Vec<Booking>> {
        let bookings = self.repository.find_all().await?;

        Ok(bookings
            .into_iter()
            .filter(|b| {
                filters
                    .vehicle_id
                    .as_deref()
                    .map_or(true, |id| b.vehicle_key().as_deref() == Some(id))
            })
            .filter(|b| filters.date.as_deref().map_or(true, |d| b.date.as_deref() == Some(d)))
            .collect())
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(not_found_error("Booking", id))
        }
    }
}
