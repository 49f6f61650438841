use serde_json::Value;
use std::sync::Arc;

use super::collection_store::{decode_record, decode_records, CollectionStore, StoreResult};
use crate::models::{User, USERS};

#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn CollectionStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { store }
    }

    pub async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        self.store
            .get(USERS, id)
            .await?
            .map(|record| decode_record(USERS, record))
            .transpose()
    }

    pub async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users: Vec<User> = decode_records(USERS, self.store.list(USERS).await?)?;
        Ok(users.into_iter().find(|user| user.has_email(email)))
    }

    /// Alta atómica: `None` si el email ya estaba registrado
    pub async fn create_unique(&self, email: &str, record: Value) -> StoreResult<Option<User>> {
        let guard = |current: &[Value]| {
            !current.iter().any(|raw| {
                raw.get("email")
                    .and_then(Value::as_str)
                    .is_some_and(|existing| existing.eq_ignore_ascii_case(email.trim()))
            })
        };

        self.store
            .insert_if(USERS, record, &guard)
            .await?
            .map(|record| decode_record(USERS, record))
            .transpose()
    }
}
