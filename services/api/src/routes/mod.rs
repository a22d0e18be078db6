//! API service routes
//!
//! Every resource mounts the generic CRUD surface from [`crud::crud_router`]
//! and merges its entity-specific routes on top. The error pipeline wraps
//! the whole router so every failure leaves as the same JSON envelope.

use axum::{Json, Router, middleware, response::IntoResponse, routing::get};
use serde_json::json;

use crate::error::ApiError;
use crate::middleware::error_pipeline;
use crate::state::AppState;

mod crud;
mod roles;
mod tasks;
mod users;

pub use crud::crud_router;

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let task_routes =
        crud_router(state.task_service.clone()).merge(tasks::routes(state.clone()));
    let user_routes =
        crud_router(state.user_service.clone()).merge(users::routes(state.clone()));
    let role_routes =
        crud_router(state.role_service.clone()).merge(roles::routes(state.clone()));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/tasks", task_routes)
        .nest("/api/users", user_routes)
        .nest("/api/roles", role_routes)
        .fallback(unknown_route)
        .layer(middleware::from_fn(error_pipeline))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "taskfodge-api"
    }))
}

async fn unknown_route() -> ApiError {
    ApiError::NotFound("Resource not found".to_string())
}
