//! Backend HTTP del collection store
//!
//! Cliente de un servidor de registros compatible con json-server
//! (`GET/POST /{collection}`, `GET/PUT/DELETE /{collection}/{id}`).

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use super::collection_store::{CollectionStore, RecordGuard, StoreError, StoreResult};

#[derive(Clone)]
pub struct HttpStore {
    client: Client,
    base_url: Url,
}

impl HttpStore {
    pub fn new(base_url: &str, timeout: Duration) -> StoreResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| StoreError::Unavailable(format!("invalid store url '{}': {}", base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(StoreError::Unavailable(format!(
                "store url '{}' cannot be used as a base",
                base_url
            )));
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn url(&self, collection: &str, id: Option<&str>) -> StoreResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| StoreError::Unavailable("store url cannot be a base".to_string()))?;
            segments.pop_if_empty().push(collection);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    async fn post(&self, collection: &str, record: &Value) -> StoreResult<Value> {
        let response = self
            .client
            .post(self.url(collection, None)?)
            .json(record)
            .send()
            .await?;

        if response.status() == StatusCode::CONFLICT {
            return Err(StoreError::DuplicateId {
                collection: collection.to_string(),
                id: record.get("id").map(|id| id.to_string()).unwrap_or_default(),
            });
        }

        Ok(response.error_for_status()?.json().await?)
    }
}

#[async_trait]
impl CollectionStore for HttpStore {
    fn backend_name(&self) -> &'static str {
        "http"
    }

    async fn list(&self, collection: &str) -> StoreResult<Vec<Value>> {
        let url = self.url(collection, None)?;
        debug!("🌐 GET {}", url);

        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        Ok(response.error_for_status()?.json().await?)
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        let response = self.client.get(self.url(collection, Some(id))?).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(response.error_for_status()?.json().await?))
    }

    async fn insert_if(
        &self,
        collection: &str,
        record: Value,
        guard: RecordGuard<'_>,
    ) -> StoreResult<Option<Value>> {
        if !record.is_object() {
            return Err(StoreError::NotAnObject);
        }

        // El servidor remoto no ofrece comprobar-e-insertar atómico
        let existing = self.list(collection).await?;
        if !guard(&existing) {
            return Ok(None);
        }
        warn!(
            "⚠️ insert_if en '{}' sobre backend http no es atómico",
            collection
        );

        self.post(collection, &record).await.map(Some)
    }

    async fn replace(&self, collection: &str, id: &str, record: Value) -> StoreResult<Option<Value>> {
        if !record.is_object() {
            return Err(StoreError::NotAnObject);
        }

        let response = self
            .client
            .put(self.url(collection, Some(id))?)
            .json(&record)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(response.error_for_status()?.json().await?))
    }

    async fn remove(&self, collection: &str, id: &str) -> StoreResult<bool> {
        let response = self.client.delete(self.url(collection, Some(id))?).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        response.error_for_status()?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building_escapes_ids() {
        let store = HttpStore::new("http://localhost:3000/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            store.url("vehicles", None).unwrap().as_str(),
            "http://localhost:3000/api/vehicles"
        );
        assert_eq!(
            store.url("vehicles", Some("a b")).unwrap().as_str(),
            "http://localhost:3000/api/vehicles/a%20b"
        );
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(HttpStore::new("not a url", Duration::from_secs(1)).is_err());
        assert!(HttpStore::new("mailto:ops@example.com", Duration::from_secs(1)).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_server_surfaces_as_error() {
        // Puerto 9 (discard) no debería tener un servidor HTTP escuchando
        let store = HttpStore::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        assert!(store.list("vehicles").await.is_err());
    }
}
