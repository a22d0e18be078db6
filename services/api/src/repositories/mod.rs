//! Persistence layer: the generic CRUD contract and the per-entity traits
//!
//! Every entity repository extends [`CrudRepository`] with its own derived
//! queries. Concrete implementations live in the sibling modules and talk
//! to Postgres through sqlx; tests substitute in-memory implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::error::DatabaseResult;
use uuid::Uuid;

use crate::models::{NewRole, NewTask, NewUser, Role, Task, User};

pub mod role;
pub mod task;
pub mod user;

pub use role::PgRoleRepository;
pub use task::PgTaskRepository;
pub use user::PgUserRepository;

/// Generic persistence contract shared by every entity type.
///
/// `create` assigns the generated identifier and timestamps and returns the
/// persisted form. `update` performs whole-entity replacement of the row
/// with the given id, yielding `None` when no such row exists, so callers
/// see absence directly rather than racing a separate existence check.
/// `delete_by_id` is idempotent and does not signal absence. None of these
/// operations carry business validation; that is layered on by the entity
/// services.
#[async_trait]
pub trait CrudRepository<T, Id, New>: Send + Sync {
    async fn create(&self, new: New) -> DatabaseResult<T>;
    async fn find_by_id(&self, id: Id) -> DatabaseResult<Option<T>>;
    async fn find_all(&self) -> DatabaseResult<Vec<T>>;
    async fn update(&self, id: Id, entity: T) -> DatabaseResult<Option<T>>;
    async fn delete_by_id(&self, id: Id) -> DatabaseResult<()>;
    async fn exists_by_id(&self, id: Id) -> DatabaseResult<bool>;
}

/// Task persistence with its derived queries
#[async_trait]
pub trait TaskRepository: CrudRepository<Task, Uuid, NewTask> {
    /// Tasks whose deadline falls inside the closed window `[from, to]`.
    async fn find_by_deadline_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DatabaseResult<Vec<Task>>;
}

/// User persistence with uniqueness probes
#[async_trait]
pub trait UserRepository: CrudRepository<User, Uuid, NewUser> {
    async fn exists_by_username(&self, username: &str) -> DatabaseResult<bool>;
    async fn exists_by_email(&self, email: &str) -> DatabaseResult<bool>;
}

/// Role persistence with a name uniqueness probe
#[async_trait]
pub trait RoleRepository: CrudRepository<Role, Uuid, NewRole> {
    async fn exists_by_name(&self, name: &str) -> DatabaseResult<bool>;
}
