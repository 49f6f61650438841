use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

use crate::dto::auth_dto::{AuthRequest, AuthResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Configura las rutas de autenticación (con los alias de json-server-auth)
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/signup", post(register))
        .route("/login", post(login))
        .route("/signin", post(login))
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<AuthRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let response = state.auth.register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<AuthRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let response = state.auth.login(request).await?;
    Ok(Json(response))
}
