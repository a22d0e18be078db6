//! Task business rules

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{NewTask, Task, UpdateTask};
use crate::repositories::{CrudRepository, TaskRepository, UserRepository};
use crate::services::CrudService;
use crate::validation;

/// Task service: validated creation, merge-style updates, and the
/// close-deadline derived read.
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
    user_repository: Arc<dyn UserRepository>,
}

impl TaskService {
    pub fn new(
        repository: Arc<dyn TaskRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            repository,
            user_repository,
        }
    }

    /// Partial-merge update: only populated fields overwrite stored values;
    /// an absent field never wipes one.
    pub async fn update_task(&self, id: Uuid, update: UpdateTask) -> ApiResult<Task> {
        info!("Updating task id={}", id);

        let mut task = self.get_by_id(id).await?;
        if let Some(title) = update.title {
            task.title = title;
        }
        if let Some(status) = update.status {
            task.status = status;
        }
        if let Some(priority) = update.priority {
            task.priority = priority;
        }
        if let Some(deadline) = update.deadline {
            task.deadline = Some(deadline);
        }
        if let Some(assigned_to) = update.assigned_to {
            self.ensure_assignee_exists(assigned_to).await?;
            task.assigned_to = Some(assigned_to);
        }

        let saved = CrudService::update(self, id, task).await?;
        info!("Task updated successfully id={}", saved.id);
        Ok(saved)
    }

    /// Tasks due inside the closed window `[now, now + 24h]`.
    pub async fn tasks_with_close_deadline(&self) -> ApiResult<Vec<Task>> {
        let now = Utc::now();
        let next_24_hours = now + Duration::hours(24);
        Ok(self
            .repository
            .find_by_deadline_between(now, next_24_hours)
            .await?)
    }

    /// Delete a task by id
    pub async fn delete_task(&self, id: Uuid) -> ApiResult<()> {
        warn!("Deleting task id={}", id);
        self.delete_by_id(id).await
    }

    async fn ensure_assignee_exists(&self, user_id: Uuid) -> ApiResult<()> {
        if !self.user_repository.exists_by_id(user_id).await? {
            return Err(ApiError::NotFound("Assigned user not found".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CrudService<Task, Uuid, NewTask> for TaskService {
    fn repository(&self) -> &dyn CrudRepository<Task, Uuid, NewTask> {
        self.repository.as_ref()
    }

    fn entity_name(&self) -> &'static str {
        "Task"
    }

    /// Validated create: the deadline, if given, must not precede the
    /// creation instant, and any assignee must exist.
    async fn create(&self, new: NewTask) -> ApiResult<Task> {
        info!("Creating task with title={}", new.title);

        let field_errors = validation::validate_new_task(&new);
        if !field_errors.is_empty() {
            return Err(ApiError::Validation(field_errors));
        }

        if let Some(deadline) = new.deadline {
            if deadline < Utc::now() {
                return Err(ApiError::BadRequest(
                    "Deadline cannot be before creation date".to_string(),
                ));
            }
        }

        if let Some(user_id) = new.assigned_to {
            self.ensure_assignee_exists(user_id).await?;
        }

        let saved = self.repository.create(new).await?;
        info!("Task created successfully with id={}", saved.id);
        Ok(saved)
    }
}
