//! User business rules

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{NewUser, Role, UpdateUser, User};
use crate::repositories::{CrudRepository, RoleRepository, UserRepository};
use crate::security::PasswordHashing;
use crate::services::CrudService;
use crate::validation;

/// User service: validated creation with uniqueness checks and password
/// hashing, merge-style updates, and role assignment.
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    role_repository: Arc<dyn RoleRepository>,
    password_hasher: Arc<dyn PasswordHashing>,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        role_repository: Arc<dyn RoleRepository>,
        password_hasher: Arc<dyn PasswordHashing>,
    ) -> Self {
        Self {
            repository,
            role_repository,
            password_hasher,
        }
    }

    /// Partial-merge update. An incoming password is hashed before it is
    /// stored; incoming role ids replace the membership set.
    pub async fn update_user(&self, id: Uuid, update: UpdateUser) -> ApiResult<User> {
        info!("Updating user id={}", id);

        let mut user = self.get_by_id(id).await?;
        if let Some(username) = update.username {
            user.username = username;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(password) = update.password {
            user.password_hash = self.password_hasher.hash(&password)?;
        }
        if let Some(role_ids) = update.roles {
            user.roles = self.resolve_roles(&role_ids).await?;
        }

        let saved = CrudService::update(self, id, user).await?;
        info!("User updated successfully id={}", saved.id);
        Ok(saved)
    }

    /// Replace a user's role membership set.
    pub async fn assign_roles(&self, id: Uuid, role_ids: Vec<Uuid>) -> ApiResult<User> {
        info!("Assigning {} roles to user id={}", role_ids.len(), id);

        let mut user = self.get_by_id(id).await?;
        user.roles = self.resolve_roles(&role_ids).await?;
        CrudService::update(self, id, user).await
    }

    /// Delete a user by id
    pub async fn delete_user(&self, id: Uuid) -> ApiResult<()> {
        warn!("Deleting user id={}", id);
        self.delete_by_id(id).await
    }

    /// Look up every referenced role, deduplicating ids; a missing role is
    /// a not-found failure.
    async fn resolve_roles(&self, role_ids: &[Uuid]) -> ApiResult<Vec<Role>> {
        let mut roles: Vec<Role> = Vec::with_capacity(role_ids.len());
        for role_id in role_ids {
            if roles.iter().any(|r| r.id == *role_id) {
                continue;
            }
            let role = self
                .role_repository
                .find_by_id(*role_id)
                .await?
                .ok_or_else(|| ApiError::NotFound("Role not found".to_string()))?;
            roles.push(role);
        }
        Ok(roles)
    }
}

#[async_trait]
impl CrudService<User, Uuid, NewUser> for UserService {
    fn repository(&self) -> &dyn CrudRepository<User, Uuid, NewUser> {
        self.repository.as_ref()
    }

    fn entity_name(&self) -> &'static str {
        "User"
    }

    /// Validated create: field rules, uniqueness pre-checks, then password
    /// hashing. Plaintext never reaches the repository.
    async fn create(&self, new: NewUser) -> ApiResult<User> {
        info!("Creating user with email={}", new.email);

        let field_errors = validation::validate_new_user(&new);
        if !field_errors.is_empty() {
            return Err(ApiError::Validation(field_errors));
        }

        if self.repository.exists_by_email(&new.email).await? {
            return Err(ApiError::Conflict("Email already exists".to_string()));
        }
        if self.repository.exists_by_username(&new.username).await? {
            return Err(ApiError::Conflict("Username already exists".to_string()));
        }

        let hashed = NewUser {
            password: self.password_hasher.hash(&new.password)?,
            ..new
        };

        let saved = self.repository.create(hashed).await?;
        info!("User created successfully with id={}", saved.id);
        Ok(saved)
    }
}
