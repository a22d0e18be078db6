//! Application state shared across handlers

use std::sync::Arc;

use crate::services::{RoleService, TaskService, UserService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub task_service: Arc<TaskService>,
    pub user_service: Arc<UserService>,
    pub role_service: Arc<RoleService>,
}
