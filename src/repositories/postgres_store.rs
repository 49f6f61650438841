//! Backend PostgreSQL del collection store
//!
//! Cada registro es una fila de la tabla `records` con su cuerpo en JSONB.
//! `insert_if` serializa los escritores de una colección con un advisory lock
//! de transacción.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::{debug, info};

use super::collection_store::{
    prepare_insert, prepare_replace, record_key, CollectionStore, RecordGuard, StoreError,
    StoreResult,
};
use crate::config::database::DatabaseConfig;

const CREATE_RECORDS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS records (
    seq         BIGSERIAL PRIMARY KEY,
    collection  TEXT        NOT NULL,
    id          TEXT        NOT NULL,
    body        JSONB       NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (collection, id)
)
"#;

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Conectar y asegurar el esquema
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        info!("🐘 Conectando a PostgreSQL: {}", config.masked_url());
        let store = Self::new(config.create_pool().await?);
        store.ensure_schema().await?;
        info!("✅ PostgreSQL conectado, tabla records lista");
        Ok(store)
    }

    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(CREATE_RECORDS_TABLE).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CollectionStore for PostgresStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn list(&self, collection: &str) -> StoreResult<Vec<Value>> {
        let records = sqlx::query_scalar::<_, Value>(
            "SELECT body FROM records WHERE collection = $1 ORDER BY seq",
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        let record = sqlx::query_scalar::<_, Value>(
            "SELECT body FROM records WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn insert_if(
        &self,
        collection: &str,
        record: Value,
        guard: RecordGuard<'_>,
    ) -> StoreResult<Option<Value>> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(collection)
            .execute(&mut *tx)
            .await?;

        let existing = sqlx::query_scalar::<_, Value>(
            "SELECT body FROM records WHERE collection = $1 ORDER BY seq",
        )
        .bind(collection)
        .fetch_all(&mut *tx)
        .await?;

        if !guard(&existing) {
            debug!("🔒 Inserción rechazada por la guarda en '{}'", collection);
            tx.rollback().await?;
            return Ok(None);
        }

        let record = prepare_insert(collection, &existing, record)?;
        let key = record_key(&record).ok_or_else(|| StoreError::Corrupt {
            collection: collection.to_string(),
            message: "record id must be a string or an integer".to_string(),
        })?;

        sqlx::query("INSERT INTO records (collection, id, body) VALUES ($1, $2, $3)")
            .bind(collection)
            .bind(&key)
            .bind(&record)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(record))
    }

    async fn replace(&self, collection: &str, id: &str, record: Value) -> StoreResult<Option<Value>> {
        let Some(current) = self.get(collection, id).await? else {
            return Ok(None);
        };
        let record = prepare_replace(&current, record)?;

        let updated = sqlx::query_scalar::<_, Value>(
            "UPDATE records SET body = $3 WHERE collection = $1 AND id = $2 RETURNING body",
        )
        .bind(collection)
        .bind(id)
        .bind(&record)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn remove(&self, collection: &str, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM records WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    async fn store() -> Option<PostgresStore> {
        let url = std::env::var("DATABASE_URL").ok()?;
        Some(PostgresStore::connect(&DatabaseConfig::new(url)).await.unwrap())
    }

    #[tokio::test]
    #[ignore] // Requiere PostgreSQL en DATABASE_URL
    async fn test_crud_and_guarded_insert() {
        let Some(store) = store().await else {
            return;
        };
        let collection = format!("bookings_{}", uuid::Uuid::new_v4().simple());

        let first = store
            .insert_if(&collection, json!({ "vehicleId": 1, "date": "2024-05-01" }), &|current| {
                current.is_empty()
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first["id"], json!(1));

        let rejected = store
            .insert_if(&collection, json!({ "vehicleId": 1, "date": "2024-05-01" }), &|current| {
                current.is_empty()
            })
            .await
            .unwrap();
        assert!(rejected.is_none());

        let replaced = store
            .replace(&collection, "1", json!({ "id": 9, "vehicleId": 2, "date": "2024-05-02" }))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(replaced["id"], json!(1));
        assert_eq!(store.get(&collection, "1").await.unwrap().unwrap()["vehicleId"], json!(2));

        assert!(store.remove(&collection, "1").await.unwrap());
        assert!(!store.remove(&collection, "1").await.unwrap());
        assert!(store.list(&collection).await.unwrap().is_empty());
    }

    #[tokio::test]
    #[ignore] // Requiere PostgreSQL en DATABASE_URL
    async fn test_advisory_lock_serialises_concurrent_inserts() {
        let Some(store) = store().await else {
            return;
        };
        let store = Arc::new(store);
        let collection = format!("bookings_{}", uuid::Uuid::new_v4().simple());

        let attempts = (0..8).map(|_| {
            let store = store.clone();
            let collection = collection.clone();
            tokio::spawn(async move {
                store
                    .insert_if(&collection, json!({ "vehicleId": 1, "date": "2024-05-01" }), &|current| {
                        current.is_empty()
                    })
                    .await
                    .unwrap()
            })
        });

        let accepted = futures::future::join_all(attempts)
            .await
            .into_iter()
            .filter(|r| matches!(r, Ok(Some(_))))
            .count();

        assert_eq!(accepted, 1);
        assert_eq!(store.list(&collection).await.unwrap().len(), 1);

        sqlx::query("DELETE FROM records WHERE collection = $1")
            .bind(&collection)
            .execute(&store.pool)
            .await
            .unwrap();
    }
}
