//! User-specific routes layered over the generic CRUD surface

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::put,
};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::models::{AssignRolesRequest, UpdateUser, User};
use crate::state::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/:id", put(update_user))
        .route("/:id/roles", put(assign_roles))
        .with_state(state)
}

/// Merge-update a user by id
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUser>,
) -> ApiResult<Json<User>> {
    state.user_service.update_user(id, payload).await.map(Json)
}

/// Replace a user's role membership set
async fn assign_roles(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignRolesRequest>,
) -> ApiResult<Json<User>> {
    state
        .user_service
        .assign_roles(id, payload.roles)
        .await
        .map(Json)
}
