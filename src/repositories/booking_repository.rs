use chrono::NaiveDate;
use serde_json::Value;
use std::sync::Arc;

use super::collection_store::{decode_record, decode_records, CollectionStore, StoreResult};
use crate::models::{Booking, BOOKINGS};

#[derive(Clone)]
pub struct BookingRepository {
    store: Arc<dyn CollectionStore>,
}

impl BookingRepository {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { store }
    }

    pub async fn find_all(&self) -> StoreResult<Vec<Booking>> {
        decode_records(BOOKINGS, self.store.list(BOOKINGS).await?)
    }

    pub async fn find_by_id(&self, id: &str) -> StoreResult<Option<Booking>> {
        self.store
            .get(BOOKINGS, id)
            .await?
            .map(|record| decode_record(BOOKINGS, record))
            .transpose()
    }

    /// Comprobar y reservar en un solo paso: el registro sólo se inserta si
    /// ninguna reserva existente ocupa el mismo vehículo ese día.
    ///
    /// Devuelve `None` cuando el vehículo ya estaba reservado.
    pub async fn reserve(
        &self,
        vehicle_key: &str,
        day: NaiveDate,
        record: Value,
    ) -> StoreResult<Option<Booking>> {
        let guard = |current: &[Value]| {
            !current.iter().any(|raw| {
                serde_json::from_value::<Booking>(raw.clone())
                    .map(|booking| booking.collides_with(vehicle_key, day))
                    .unwrap_or(false)
            })
        };

        self.store
            .insert_if(BOOKINGS, record, &guard)
            .await?
            .map(|record| decode_record(BOOKINGS, record))
            .transpose()
    }

    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        self.store.remove(BOOKINGS, id).await
    }
}
