use serde_json::Value;
use std::sync::Arc;

use super::collection_store::{decode_record, decode_records, CollectionStore, StoreResult};
use crate::models::{Vehicle, VEHICLES};

#[derive(Clone)]
pub struct VehicleRepository {
    store: Arc<dyn CollectionStore>,
}

impl VehicleRepository {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { store }
    }

    /// Catálogo completo en orden de inserción
    pub async fn find_all(&self) -> StoreResult<Vec<Vehicle>> {
        decode_records(VEHICLES, self.store.list(VEHICLES).await?)
    }

    pub async fn find_by_id(&self, id: &str) -> StoreResult<Option<Vehicle>> {
        self.store
            .get(VEHICLES, id)
            .await?
            .map(|record| decode_record(VEHICLES, record))
            .transpose()
    }

    pub async fn create(&self, record: Value) -> StoreResult<Vehicle> {
        decode_record(VEHICLES, self.store.insert(VEHICLES, record).await?)
    }

    pub async fn replace(&self, id: &str, record: Value) -> StoreResult<Option<Vehicle>> {
        self.store
            .replace(VEHICLES, id, record)
            .await?
            .map(|record| decode_record(VEHICLES, record))
            .transpose()
    }

    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        self.store.remove(VEHICLES, id).await
    }
}
