//! Servicio de autenticación
//!
//! Registro y login con email/contraseña. Las contraseñas se guardan con
//! bcrypt y las sesiones son tokens JWT sin estado.

use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

use crate::dto::auth_dto::{AuthRequest, AuthResponse, Credentials};
use crate::models::PublicUser;
use crate::repositories::{CollectionStore, UserRepository};
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::jwt::{generate_token, JwtConfig};

#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    jwt: JwtConfig,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(store: Arc<dyn CollectionStore>, jwt: JwtConfig, bcrypt_cost: u32) -> Self {
        Self {
            users: UserRepository::new(store),
            jwt,
            bcrypt_cost,
        }
    }

    /// Registrar un usuario nuevo y devolver su token
    pub async fn register(&self, request: AuthRequest) -> AppResult<AuthResponse> {
        let (credentials, mut extra) = request.into_parts()?;
        credentials.validate()?;

        let password = credentials.password.clone();
        let cost = self.bcrypt_cost;
        let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::Internal(format!("Hash task failed: {}", e)))?
            .map_err(|e| AppError::Internal(format!("Error hashing password: {}", e)))?;

        extra.remove("id");
        extra.insert("email".to_string(), Value::from(credentials.email.trim()));
        extra.insert("password".to_string(), Value::from(password_hash));

        let user = self
            .users
            .create_unique(&credentials.email, Value::Object(extra))
            .await?
            .ok_or_else(|| AppError::BadRequest("Email already exists".to_string()))?;

        info!("👤 Usuario registrado: {} ({})", user.email, user.id);
        let access_token = generate_token(&user.id.key(), &user.email, &self.jwt)?;

        Ok(AuthResponse {
            access_token,
            user: user.into(),
        })
    }

    /// Login con email y contraseña
    pub async fn login(&self, request: AuthRequest) -> AppResult<AuthResponse> {
        let (credentials, _) = request.into_parts()?;

        let user = self
            .users
            .find_by_email(&credentials.email)
            .await?
            .ok_or_else(|| AppError::BadRequest("Cannot find user".to_string()))?;

        let password = credentials.password;
        let hash = user.password.clone();
        let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("Hash task failed: {}", e)))?
            // Un hash ilegible en el store equivale a contraseña incorrecta
            .unwrap_or(false);

        if !valid {
            warn!("🔐 Contraseña incorrecta para {}", user.email);
            return Err(AppError::BadRequest("Incorrect password".to_string()));
        }

        info!("🔓 Login correcto: {}", user.email);
        let access_token = generate_token(&user.id.key(), &user.email, &self.jwt)?;

        Ok(AuthResponse {
            access_token,
            user: user.into(),
        })
    }

    /// Perfil de un usuario; sólo el propio usuario puede leerlo
    pub async fn get_user(&self, id: &str, requester_id: &str) -> AppResult<PublicUser> {
        if requester_id != id {
            return Err(AppError::Forbidden(
                "You can only access your own user record".to_string(),
            ));
        }

        self.users
            .find_by_id(id)
            .await?
            .map(PublicUser::from)
            .ok_or_else(|| not_found_error("User", id))
    }
}

impl AuthRequest {
    /// Separar credenciales obligatorias del resto de campos
    fn into_parts(self) -> AppResult<(Credentials, serde_json::Map<String, Value>)> {
        match (self.email, self.password) {
            (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
                Ok((Credentials { email, password }, self.extra))
            }
            _ => Err(AppError::BadRequest(
                "Email and password are required".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryStore;
    use crate::utils::jwt::verify_token;
    use serde_json::json;

    fn jwt() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            expiration: 3600,
        }
    }

    fn service() -> AuthService {
        AuthService::new(Arc::new(MemoryStore::new()), jwt(), 4)
    }

    fn request(value: Value) -> AuthRequest {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let service = service();

        let registered = service
            .register(request(json!({ "email": "ann@example.com", "password": "secret", "name": "Ann" })))
            .await
            .unwrap();
        assert_eq!(registered.user.email, "ann@example.com");
        assert_eq!(registered.user.extra.get("name"), Some(&json!("Ann")));
        assert!(registered.user.extra.get("password").is_none());

        let logged_in = service
            .login(request(json!({ "email": "ANN@example.com", "password": "secret" })))
            .await
            .unwrap();
        let claims = verify_token(&logged_in.access_token, &jwt()).unwrap();
        assert_eq!(claims.sub, registered.user.id.key());
    }

    #[tokio::test]
    async fn test_register_rejects_duplicates_and_bad_input() {
        let service = service();
        service
            .register(request(json!({ "email": "ann@example.com", "password": "secret" })))
            .await
            .unwrap();

        assert!(matches!(
            service
                .register(request(json!({ "email": "Ann@Example.com", "password": "other" })))
                .await,
            Err(AppError::BadRequest(msg)) if msg == "Email already exists"
        ));
        assert!(matches!(
            service.register(request(json!({ "email": "ann@example.com" }))).await,
            Err(AppError::BadRequest(msg)) if msg == "Email and password are required"
        ));
        assert!(matches!(
            service
                .register(request(json!({ "email": "not-an-email", "password": "secret" })))
                .await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            service
                .register(request(json!({ "email": "bob@example.com", "password": "abc" })))
                .await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_login_failures() {
        let service = service();
        service
            .register(request(json!({ "email": "ann@example.com", "password": "secret" })))
            .await
            .unwrap();

        assert!(matches!(
            service
                .login(request(json!({ "email": "bob@example.com", "password": "secret" })))
                .await,
            Err(AppError::BadRequest(msg)) if msg == "Cannot find user"
        ));
        assert!(matches!(
            service
                .login(request(json!({ "email": "ann@example.com", "password": "wrong" })))
                .await,
            Err(AppError::BadRequest(msg)) if msg == "Incorrect password"
        ));
    }

    #[tokio::test]
    async fn test_get_user_only_for_owner() {
        let service = service();
        let registered = service
            .register(request(json!({ "email": "ann@example.com", "password": "secret" })))
            .await
            .unwrap();
        let claims = verify_token(&registered.access_token, &jwt()).unwrap();
        let id = registered.user.id.key();

        assert_eq!(service.get_user(&id, &claims.sub).await.unwrap().email, "ann@example.com");
        assert!(matches!(
            service.get_user("999", &claims.sub).await,
            Err(AppError::Forbidden(_))
        ));
    }
}
