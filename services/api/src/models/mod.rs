//! Domain models and request payloads

pub mod role;
pub mod task;
pub mod user;

// Re-export for convenience
pub use role::{NewRole, Role, UpdateRole};
pub use task::{NewTask, Task, TaskPriority, TaskStatus, UpdateTask};
pub use user::{AssignRolesRequest, NewUser, UpdateUser, User};
