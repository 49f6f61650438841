//! Backend en memoria del collection store
//!
//! Colecciones guardadas en un `RwLock`. Con fichero asociado, el estado se
//! siembra desde un `db.json` (objeto de arrays, formato json-server) y se
//! reescribe tras cada mutación.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::collection_store::{
    prepare_insert, prepare_replace, record_key, CollectionStore, RecordGuard, StoreError,
    StoreResult,
};

type Collections = HashMap<String, Vec<Value>>;

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
    path: Option<PathBuf>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construir desde un snapshot `{ "vehicles": [...], "bookings": [...] }`
    pub fn from_snapshot(snapshot: Value) -> StoreResult<Self> {
        Ok(Self {
            collections: RwLock::new(parse_snapshot(snapshot)?),
            path: None,
        })
    }

    /// Abrir un fichero db.json; si no existe se empieza vacío y se creará
    /// en la primera escritura
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();

        let collections = match tokio::fs::read(&path).await {
            Ok(bytes) => parse_snapshot(serde_json::from_slice(&bytes)?)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("📄 {} no existe, se empieza con un store vacío", path.display());
                Collections::new()
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            "📂 Store en memoria cargado desde {} ({} colecciones)",
            path.display(),
            collections.len()
        );

        Ok(Self {
            collections: RwLock::new(collections),
            path: Some(path),
        })
    }

    /// Escribir en disco el estado que resultaría de sustituir `collection`
    /// por `next`. Se llama con el lock de escritura tomado y antes de tocar
    /// la memoria: si falla, el estado en memoria no cambia.
    async fn persist(&self, collections: &Collections, collection: &str, next: &[Value]) -> StoreResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let mut snapshot: Map<String, Value> = collections
            .iter()
            .map(|(name, records)| (name.clone(), Value::Array(records.clone())))
            .collect();
        snapshot.insert(collection.to_string(), Value::Array(next.to_vec()));
        let bytes = serde_json::to_vec_pretty(&Value::Object(snapshot))?;

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, path).await?;
        debug!("💾 Store persistido en {}", path.display());
        Ok(())
    }
}

fn parse_snapshot(snapshot: Value) -> StoreResult<Collections> {
    let Value::Object(object) = snapshot else {
        return Err(StoreError::NotAnObject);
    };

    object
        .into_iter()
        .filter_map(|(name, value)| match value {
            Value::Array(records) => Some(Ok((name, records))),
            // json-server también admite objetos singulares (p.ej. "profile"); no son colecciones
            Value::Object(_) => None,
            _ => Some(Err(StoreError::Corrupt {
                collection: name,
                message: "expected an array of records".to_string(),
            })),
        })
        .collect()
}

fn position(records: &[Value], id: &str) -> Option<usize> {
    records
        .iter()
        .position(|record| record_key(record).as_deref() == Some(id))
}

#[async_trait]
impl CollectionStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn list(&self, collection: &str) -> StoreResult<Vec<Value>> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|records| position(records, id).map(|i| records[i].clone())))
    }

    async fn insert_if(
        &self,
        collection: &str,
        record: Value,
        guard: RecordGuard<'_>,
    ) -> StoreResult<Option<Value>> {
        let mut collections = self.collections.write().await;
        let current = collections.get(collection).map(Vec::as_slice).unwrap_or_default();

        if !guard(current) {
            return Ok(None);
        }

        let record = prepare_insert(collection, current, record)?;
        let mut next = current.to_vec();
        next.push(record.clone());

        self.persist(&collections, collection, &next).await?;
        collections.insert(collection.to_string(), next);
        Ok(Some(record))
    }

    async fn replace(&self, collection: &str, id: &str, record: Value) -> StoreResult<Option<Value>> {
        let mut collections = self.collections.write().await;
        let Some(records) = collections.get(collection) else {
            return Ok(None);
        };
        let Some(index) = position(records, id) else {
            return Ok(None);
        };

        let record = prepare_replace(&records[index], record)?;
        let mut next = records.clone();
        next[index] = record.clone();

        self.persist(&collections, collection, &next).await?;
        collections.insert(collection.to_string(), next);
        Ok(Some(record))
    }

    async fn remove(&self, collection: &str, id: &str) -> StoreResult<bool> {
        let mut collections = self.collections.write().await;
        let Some(records) = collections.get(collection) else {
            return Ok(false);
        };
        let Some(index) = position(records, id) else {
            return Ok(false);
        };

        let mut next = records.clone();
        next.remove(index);

        self.persist(&collections, collection, &next).await?;
        collections.insert(collection.to_string(), next);
        Ok(true)
    }
}
