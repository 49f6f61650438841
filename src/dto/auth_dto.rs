use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::models::PublicUser;

// Body de /register y /login; cualquier campo extra se guarda con el usuario
#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Validate)]
pub struct Credentials {
    #[validate(email(message = "Email format is invalid"))]
    pub email: String,

    #[validate(length(min = 4, message = "Password is too short"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub user: PublicUser,
}
