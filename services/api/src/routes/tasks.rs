//! Task-specific routes layered over the generic CRUD surface

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::models::{NewTask, Task, UpdateTask};
use crate::services::CrudService;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/custom", post(create_task))
        .route("/deadline-soon", get(tasks_with_close_deadline))
        .route("/:id", put(update_task))
        .with_state(state)
}

/// Create a task through the validated entry point
async fn create_task(
    State(state): State<AppState>,
    Json(payload): Json<NewTask>,
) -> ApiResult<Json<Task>> {
    state.task_service.create(payload).await.map(Json)
}

/// Tasks whose deadline falls within the next 24 hours
async fn tasks_with_close_deadline(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    state.task_service.tasks_with_close_deadline().await.map(Json)
}

/// Merge-update a task by id
async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTask>,
) -> ApiResult<Json<Task>> {
    state.task_service.update_task(id, payload).await.map(Json)
}
