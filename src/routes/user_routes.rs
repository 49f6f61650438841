use axum::{
    extract::{Path, State},
    middleware,
    routing::get,
    Extension, Json, Router,
};

use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::models::PublicUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas protegidas: el middleware necesita el estado para verificar el token
pub fn create_user_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/users/:id", get(get_user))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn get_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<PublicUser>, AppError> {
    let response = state.auth.get_user(&id, &user.user_id).await?;
    Ok(Json(response))
}
