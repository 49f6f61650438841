//! Collection store
//!
//! Interfaz estrecha sobre el almacén de registros JSON (`vehicles`,
//! `bookings`, `users`). Los servicios sólo ven este trait; los backends
//! concretos viven en `memory_store`, `postgres_store` y `http_store`.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::models::RecordId;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("collection store unavailable: {0}")]
    Unavailable(String),

    #[error("corrupt record in '{collection}': {message}")]
    Corrupt { collection: String, message: String },

    #[error("{collection} record with id '{id}' already exists")]
    DuplicateId { collection: String, id: String },

    #[error("record must be a JSON object")]
    NotAnObject,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Predicado evaluado sobre el contenido actual de una colección
pub type RecordGuard<'a> = &'a (dyn Fn(&[Value]) -> bool + Send + Sync);

#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Nombre del backend para logs
    fn backend_name(&self) -> &'static str;

    /// Todos los registros de la colección en orden de inserción
    async fn list(&self, collection: &str) -> StoreResult<Vec<Value>>;

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Value>>;

    /// Inserta `record` sólo si `guard` acepta el contenido actual de la
    /// colección. Comprobación e inserción son atómicas salvo en backends que
    /// no ofrecen esa primitiva.
    async fn insert_if(
        &self,
        collection: &str,
        record: Value,
        guard: RecordGuard<'_>,
    ) -> StoreResult<Option<Value>>;

    /// Reemplazo completo; el id del registro se conserva
    async fn replace(&self, collection: &str, id: &str, record: Value) -> StoreResult<Option<Value>>;

    async fn remove(&self, collection: &str, id: &str) -> StoreResult<bool>;

    async fn insert(&self, collection: &str, record: Value) -> StoreResult<Value> {
        self.insert_if(collection, record, &|_| true)
            .await?
            .ok_or_else(|| StoreError::Unavailable("unconditional insert was rejected".to_string()))
    }
}

/// Clave de texto del id de un registro
pub fn record_key(record: &Value) -> Option<String> {
    RecordId::of_record(record).map(|id| id.key())
}

/// Siguiente id: entero `max + 1` si todos los ids existentes son enteros,
/// en otro caso un UUID
pub fn next_record_id(existing: &[Value]) -> Value {
    let ids: Option<Vec<i64>> = existing
        .iter()
        .map(|record| record.get("id").and_then(Value::as_i64))
        .collect();

    match ids {
        Some(ids) => Value::from(ids.into_iter().max().unwrap_or(0) + 1),
        None => Value::from(uuid::Uuid::new_v4().to_string()),
    }
}

/// Preparar un registro nuevo: asigna id si falta y rechaza duplicados
pub fn prepare_insert(collection: &str, existing: &[Value], mut record: Value) -> StoreResult<Value> {
    let needs_id = match record.as_object() {
        Some(object) => object.get("id").map_or(true, Value::is_null),
        None => return Err(StoreError::NotAnObject),
    };

    if needs_id {
        let id = next_record_id(existing);
        if let Some(object) = record.as_object_mut() {
            object.insert("id".to_string(), id);
        }
    } else if let Some(key) = record_key(&record) {
        if existing.iter().any(|r| record_key(r).as_deref() == Some(key.as_str())) {
            return Err(StoreError::DuplicateId {
                collection: collection.to_string(),
                id: key,
            });
        }
    }

    Ok(record)
}

/// Preparar un reemplazo: fuerza el id del registro existente
pub fn prepare_replace(current: &Value, mut record: Value) -> StoreResult<Value> {
    let object = record.as_object_mut().ok_or(StoreError::NotAnObject)?;
    match current.get("id") {
        Some(id) => {
            object.insert("id".to_string(), id.clone());
        }
        None => {
            object.remove("id");
        }
    }
    Ok(record)
}

/// Decodificar registros crudos a un modelo tipado
pub fn decode_records<T: DeserializeOwned>(collection: &str, records: Vec<Value>) -> StoreResult<Vec<T>> {
    records
        .into_iter()
        .map(|record| decode_record(collection, record))
        .collect()
}

pub fn decode_record<T: DeserializeOwned>(collection: &str, record: Value) -> StoreResult<T> {
    serde_json::from_value(record).map_err(|e| StoreError::Corrupt {
        collection: collection.to_string(),
        message: e.to_string(),
    })
}
