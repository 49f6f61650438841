#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use async_trait::async_trait;
use serde_json::{json, Value};
use tower::ServiceExt;

use rental_availability::config::EnvironmentConfig;
use rental_availability::create_app;
use rental_availability::repositories::collection_store::RecordGuard;
use rental_availability::repositories::{CollectionStore, MemoryStore, StoreError, StoreResult};
use rental_availability::state::AppState;

/// Catálogo y reservas de los escenarios de disponibilidad
pub fn rental_fixture() -> Value {
    json!({
        "vehicles": [
            { "id": 1, "type": "van", "location": "Colombo", "brand": "Toyota", "pricePerDay": 8500, "seats": 8 },
            { "id": 2, "type": "car", "location": "Colombo", "brand": "Honda", "pricePerDay": 5000, "seats": 4 }
        ],
        "bookings": [
            { "id": 10, "vehicleId": 1, "date": "2024-05-01" }
        ],
        "users": []
    })
}

pub struct TestApp {
    router: Router,
}

pub struct TestResponse {
    status: StatusCode,
    body: Value,
}

impl TestResponse {
    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    pub fn json(&self) -> Value {
        self.body.clone()
    }
}

pub async fn create_test_app() -> TestApp {
    create_test_app_with(rental_fixture()).await
}

pub async fn create_test_app_with(snapshot: Value) -> TestApp {
    let store = MemoryStore::from_snapshot(snapshot).expect("valid fixture");
    create_test_app_with_store(Arc::new(store))
}

pub fn create_test_app_with_store(store: Arc<dyn CollectionStore>) -> TestApp {
    let config = EnvironmentConfig {
        jwt_secret: "integration-test-secret".to_string(),
        bcrypt_cost: 4,
        ..EnvironmentConfig::default()
    };

    TestApp {
        router: create_app(AppState::new(config, store)),
    }
}

/// Store cuyo servidor nunca responde
pub struct UnreachableStore;

fn unreachable() -> StoreError {
    StoreError::Unavailable("connection refused".to_string())
}

#[async_trait]
impl CollectionStore for UnreachableStore {
    fn backend_name(&self) -> &'static str {
        "unreachable"
    }

    async fn list(&self, _collection: &str) -> StoreResult<Vec<Value>> {
        Err(unreachable())
    }

    async fn get(&self, _collection: &str, _id: &str) -> StoreResult<Option<Value>> {
        Err(unreachable())
    }

    async fn insert_if(
        &self,
        _collection: &str,
        _record: Value,
        _guard: RecordGuard<'_>,
    ) -> StoreResult<Option<Value>> {
        Err(unreachable())
    }

    async fn replace(&self, _collection: &str, _id: &str, _record: Value) -> StoreResult<Option<Value>> {
        Err(unreachable())
    }

    async fn remove(&self, _collection: &str, _id: &str) -> StoreResult<bool> {
        Err(unreachable())
    }
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None, None).await
    }

    pub async fn get_with_token(&self, uri: &str, token: &str) -> TestResponse {
        self.send(Method::GET, uri, None, Some(token)).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body), None).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::PUT, uri, Some(body), None).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None, None).await
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse { status, body }
    }
}
