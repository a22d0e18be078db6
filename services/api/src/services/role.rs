//! Role business rules

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{NewRole, Role, UpdateRole};
use crate::repositories::{CrudRepository, RoleRepository};
use crate::services::CrudService;
use crate::validation;

/// Role service: validated creation with a duplicate-name check and a
/// merge-style update.
pub struct RoleService {
    repository: Arc<dyn RoleRepository>,
}

impl RoleService {
    pub fn new(repository: Arc<dyn RoleRepository>) -> Self {
        Self { repository }
    }

    /// Partial-merge update: only a populated name overwrites.
    pub async fn update_role(&self, id: Uuid, update: UpdateRole) -> ApiResult<Role> {
        info!("Updating role id={}", id);

        let mut role = self.get_by_id(id).await?;
        if let Some(name) = update.name {
            role.name = name;
        }

        let saved = CrudService::update(self, id, role).await?;
        info!("Role updated successfully id={}", saved.id);
        Ok(saved)
    }

    /// Delete a role by id
    pub async fn delete_role(&self, id: Uuid) -> ApiResult<()> {
        warn!("Deleting role id={}", id);
        self.delete_by_id(id).await
    }
}

#[async_trait]
impl CrudService<Role, Uuid, NewRole> for RoleService {
    fn repository(&self) -> &dyn CrudRepository<Role, Uuid, NewRole> {
        self.repository.as_ref()
    }

    fn entity_name(&self) -> &'static str {
        "Role"
    }

    /// Validated create: a duplicate name is a conflict.
    async fn create(&self, new: NewRole) -> ApiResult<Role> {
        info!("Attempting to create role: {}", new.name);

        let field_errors = validation::validate_new_role(&new);
        if !field_errors.is_empty() {
            return Err(ApiError::Validation(field_errors));
        }

        if self.repository.exists_by_name(&new.name).await? {
            return Err(ApiError::Conflict("Role already exists".to_string()));
        }

        let saved = self.repository.create(new).await?;
        info!("Role created successfully with id={}", saved.id);
        Ok(saved)
    }
}
