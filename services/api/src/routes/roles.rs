//! Role-specific routes layered over the generic CRUD surface

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::put,
};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::models::{Role, UpdateRole};
use crate::state::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new().route("/:id", put(update_role)).with_state(state)
}

/// Merge-update a role by id
async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRole>,
) -> ApiResult<Json<Role>> {
    state.role_service.update_role(id, payload).await.map(Json)
}
