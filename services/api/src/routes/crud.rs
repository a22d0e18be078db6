//! Generic CRUD routing
//!
//! [`crud_router`] mounts the uniform create/list/fetch/delete surface for
//! any entity service, so every resource answers the same four routes the
//! same way.

use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::error::ApiError;
use crate::services::CrudService;

/// Build the uniform CRUD routes for one entity service:
/// `POST /`, `GET /`, `GET /:id` and `DELETE /:id` (204 on success).
pub fn crud_router<T, Id, New, S>(service: Arc<S>) -> Router
where
    T: Serialize + Send + 'static,
    Id: DeserializeOwned + Send + 'static,
    New: DeserializeOwned + Send + 'static,
    S: CrudService<T, Id, New> + 'static,
{
    let create_service = service.clone();
    let list_service = service.clone();
    let fetch_service = service.clone();
    let delete_service = service;

    Router::new()
        .route(
            "/",
            post(move |Json(payload): Json<New>| {
                let service = create_service.clone();
                async move { service.create(payload).await.map(Json) }
            })
            .get(move || {
                let service = list_service.clone();
                async move { service.find_all().await.map(Json) }
            }),
        )
        .route(
            "/:id",
            get(move |Path(id): Path<Id>| {
                let service = fetch_service.clone();
                async move { service.get_by_id(id).await.map(Json) }
            })
            .delete(move |Path(id): Path<Id>| {
                let service = delete_service.clone();
                async move {
                    service.delete_by_id(id).await?;
                    Ok::<_, ApiError>(StatusCode::NO_CONTENT)
                }
            }),
        )
}
