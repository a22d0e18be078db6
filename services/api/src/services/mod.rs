//! Business-rule layer: the generic CRUD service and the entity services
//!
//! [`CrudService`] supplies the uniform create/read/update/delete operations
//! by delegating to a [`CrudRepository`]; entity services override `create`
//! with their business rules and add merge-style updates and derived reads.

use async_trait::async_trait;

use crate::error::{ApiError, ApiResult};
use crate::repositories::CrudRepository;

pub mod role;
pub mod task;
pub mod user;

pub use role::RoleService;
pub use task::TaskService;
pub use user::UserService;

/// Generic CRUD operations over an entity type.
///
/// Defaults delegate straight to the repository. `create` carries no
/// business validation here; entity services override it. `update` is
/// whole-entity replacement and fails with not-found when the id is absent,
/// never silently creating; absence is reported by the write itself, so a
/// concurrent delete cannot slip between a check and the update.
/// `find_by_id` never errors on absence; `get_by_id` is the throwing
/// accessor.
#[async_trait]
pub trait CrudService<T, Id, New>: Send + Sync
where
    T: Send + 'static,
    Id: Send + 'static,
    New: Send + 'static,
{
    /// The repository this service delegates to
    fn repository(&self) -> &dyn CrudRepository<T, Id, New>;

    /// Entity name used in not-found messages
    fn entity_name(&self) -> &'static str;

    async fn create(&self, new: New) -> ApiResult<T> {
        Ok(self.repository().create(new).await?)
    }

    async fn find_by_id(&self, id: Id) -> ApiResult<Option<T>> {
        Ok(self.repository().find_by_id(id).await?)
    }

    /// Fetch by id or fail with a 404-class error.
    async fn get_by_id(&self, id: Id) -> ApiResult<T> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("{} not found", self.entity_name())))
    }

    async fn find_all(&self) -> ApiResult<Vec<T>> {
        Ok(self.repository().find_all().await?)
    }

    async fn update(&self, id: Id, entity: T) -> ApiResult<T> {
        self.repository()
            .update(id, entity)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("{} not found", self.entity_name())))
    }

    async fn delete_by_id(&self, id: Id) -> ApiResult<()> {
        Ok(self.repository().delete_by_id(id).await?)
    }
}
