//! In-memory repositories and wiring shared by the integration tests

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use axum::Router;
use common::error::{DatabaseError, DatabaseResult};

use api::models::{NewRole, NewTask, NewUser, Role, Task, User};
use api::repositories::{CrudRepository, RoleRepository, TaskRepository, UserRepository};
use api::routes::create_router;
use api::security::ArgonPasswordHasher;
use api::services::{RoleService, TaskService, UserService};
use api::state::AppState;

#[derive(Default)]
pub struct InMemoryTaskRepository {
    rows: Mutex<HashMap<Uuid, Task>>,
}

#[async_trait]
impl CrudRepository<Task, Uuid, NewTask> for InMemoryTaskRepository {
    async fn create(&self, new: NewTask) -> DatabaseResult<Task> {
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            title: new.title,
            status: new.status,
            priority: new.priority,
            created_at: now,
            updated_at: now,
            deadline: new.deadline,
            assigned_to: new.assigned_to,
        };
        self.rows.lock().unwrap().insert(task.id, task.clone());
        Ok(task)
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Task>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self) -> DatabaseResult<Vec<Task>> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, id: Uuid, entity: Task) -> DatabaseResult<Option<Task>> {
        let mut rows = self.rows.lock().unwrap();
        if !rows.contains_key(&id) {
            return Ok(None);
        }
        let updated = Task {
            id,
            updated_at: Utc::now(),
            ..entity
        };
        rows.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete_by_id(&self, id: Uuid) -> DatabaseResult<()> {
        self.rows.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn exists_by_id(&self, id: Uuid) -> DatabaseResult<bool> {
        Ok(self.rows.lock().unwrap().contains_key(&id))
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_by_deadline_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DatabaseResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|t| t.deadline.is_some_and(|d| d >= from && d <= to))
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.deadline);
        Ok(tasks)
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<HashMap<Uuid, User>>,
}

#[async_trait]
impl CrudRepository<User, Uuid, NewUser> for InMemoryUserRepository {
    async fn create(&self, new: NewUser) -> DatabaseResult<User> {
        let mut rows = self.rows.lock().unwrap();
        if rows.values().any(|u| u.username == new.username) {
            return Err(DatabaseError::UniqueViolation(format!(
                "duplicate key value: {}",
                new.username
            )));
        }
        if rows.values().any(|u| u.email == new.email) {
            return Err(DatabaseError::UniqueViolation(format!(
                "duplicate key value: {}",
                new.email
            )));
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: new.username,
            email: new.email,
            // The service hashes before the repository sees the value.
            password_hash: new.password,
            created_at: now,
            updated_at: now,
            roles: Vec::new(),
        };
        rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self) -> DatabaseResult<Vec<User>> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, id: Uuid, entity: User) -> DatabaseResult<Option<User>> {
        let mut rows = self.rows.lock().unwrap();
        if !rows.contains_key(&id) {
            return Ok(None);
        }
        let updated = User {
            id,
            updated_at: Utc::now(),
            ..entity
        };
        rows.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete_by_id(&self, id: Uuid) -> DatabaseResult<()> {
        self.rows.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn exists_by_id(&self, id: Uuid) -> DatabaseResult<bool> {
        Ok(self.rows.lock().unwrap().contains_key(&id))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn exists_by_username(&self, username: &str) -> DatabaseResult<bool> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .any(|u| u.username == username))
    }

    async fn exists_by_email(&self, email: &str) -> DatabaseResult<bool> {
        Ok(self.rows.lock().unwrap().values().any(|u| u.email == email))
    }
}

#[derive(Default)]
pub struct InMemoryRoleRepository {
    rows: Mutex<HashMap<Uuid, Role>>,
}

#[async_trait]
impl CrudRepository<Role, Uuid, NewRole> for InMemoryRoleRepository {
    async fn create(&self, new: NewRole) -> DatabaseResult<Role> {
        let mut rows = self.rows.lock().unwrap();
        if rows.values().any(|r| r.name == new.name) {
            return Err(DatabaseError::UniqueViolation(format!(
                "duplicate key value: {}",
                new.name
            )));
        }
        let role = Role {
            id: Uuid::new_v4(),
            name: new.name,
        };
        rows.insert(role.id, role.clone());
        Ok(role)
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Role>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self) -> DatabaseResult<Vec<Role>> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, id: Uuid, entity: Role) -> DatabaseResult<Option<Role>> {
        let mut rows = self.rows.lock().unwrap();
        if !rows.contains_key(&id) {
            return Ok(None);
        }
        let updated = Role { id, ..entity };
        rows.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete_by_id(&self, id: Uuid) -> DatabaseResult<()> {
        self.rows.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn exists_by_id(&self, id: Uuid) -> DatabaseResult<bool> {
        Ok(self.rows.lock().unwrap().contains_key(&id))
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn exists_by_name(&self, name: &str) -> DatabaseResult<bool> {
        Ok(self.rows.lock().unwrap().values().any(|r| r.name == name))
    }

}

/// The full service stack wired over in-memory repositories.
pub struct TestBackend {
    pub tasks: Arc<InMemoryTaskRepository>,
    pub users: Arc<InMemoryUserRepository>,
    pub roles: Arc<InMemoryRoleRepository>,
    pub state: AppState,
}

impl TestBackend {
    pub fn new() -> Self {
        let tasks = Arc::new(InMemoryTaskRepository::default());
        let users = Arc::new(InMemoryUserRepository::default());
        let roles = Arc::new(InMemoryRoleRepository::default());

        let state = AppState {
            task_service: Arc::new(TaskService::new(tasks.clone(), users.clone())),
            user_service: Arc::new(UserService::new(
                users.clone(),
                roles.clone(),
                Arc::new(ArgonPasswordHasher),
            )),
            role_service: Arc::new(RoleService::new(roles.clone())),
        };

        Self {
            tasks,
            users,
            roles,
            state,
        }
    }

    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }
}
