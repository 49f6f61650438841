//! Modelo de User
//!
//! Usuario registrado en la colección `users`. El hash de la contraseña
//! nunca sale en las respuestas: se usa `PublicUser`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::record_id::RecordId;

pub const USERS: &str = "users";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub email: String,
    /// Hash bcrypt
    pub password: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Usuario sin credenciales
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublicUser {
    pub id: RecordId,
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            extra: user.extra,
        }
    }
}

impl User {
    pub fn has_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }
}
