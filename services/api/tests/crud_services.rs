//! Service-layer behavior over in-memory repositories

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use uuid::Uuid;

use api::error::ApiError;
use api::models::{NewRole, NewTask, NewUser, TaskPriority, TaskStatus, UpdateTask, UpdateUser};
use api::services::CrudService;

use crate::common::TestBackend;

fn valid_user(username: &str, email: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password: "hunter2abc".to_string(),
    }
}

fn task_titled(title: &str) -> NewTask {
    NewTask {
        title: title.to_string(),
        status: TaskStatus::default(),
        priority: TaskPriority::default(),
        deadline: None,
        assigned_to: None,
    }
}

#[tokio::test]
async fn duplicate_role_name_is_a_conflict() {
    let backend = TestBackend::new();
    let svc = &backend.state.role_service;

    svc.create(NewRole {
        name: "admin".to_string(),
    })
    .await
    .unwrap();

    let err = svc
        .create(NewRole {
            name: "admin".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.status(), StatusCode::CONFLICT);
    assert_eq!(err.public_message(), "Role already exists");
}

#[tokio::test]
async fn user_create_stores_a_hash_not_the_plaintext() {
    let backend = TestBackend::new();
    let user = backend
        .state
        .user_service
        .create(valid_user("alice", "alice@example.com"))
        .await
        .unwrap();

    assert_ne!(user.password_hash, "hunter2abc");
    assert!(user.password_hash.starts_with("$argon2"));
}

#[tokio::test]
async fn user_create_rejects_a_malformed_email_with_field_detail() {
    let backend = TestBackend::new();
    let err = backend
        .state
        .user_service
        .create(valid_user("alice", "not-an-email"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    let fields = err.field_errors().unwrap();
    assert!(fields.iter().any(|f| f.field == "email"));
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let backend = TestBackend::new();
    let svc = &backend.state.user_service;

    svc.create(valid_user("alice", "alice@example.com"))
        .await
        .unwrap();

    let err = svc
        .create(valid_user("alice2", "alice@example.com"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), StatusCode::CONFLICT);
    assert_eq!(err.public_message(), "Email already exists");
}

#[tokio::test]
async fn task_with_a_past_deadline_is_rejected() {
    let backend = TestBackend::new();
    let mut new = task_titled("write report");
    new.deadline = Some(Utc::now() - Duration::minutes(5));

    let err = backend.state.task_service.create(new).await.unwrap_err();

    assert!(matches!(err, ApiError::BadRequest(_)));
    assert_eq!(
        err.public_message(),
        "Deadline cannot be before creation date"
    );
}

#[tokio::test]
async fn task_with_an_unknown_assignee_is_rejected() {
    let backend = TestBackend::new();
    let mut new = task_titled("write report");
    new.assigned_to = Some(Uuid::new_v4());

    let err = backend.state.task_service.create(new).await.unwrap_err();

    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    assert_eq!(err.public_message(), "Assigned user not found");
}

#[tokio::test]
async fn close_deadline_window_is_inclusive_on_both_ends() {
    let backend = TestBackend::new();
    let svc = &backend.state.task_service;

    let mut soon = task_titled("due soon");
    soon.deadline = Some(Utc::now() + Duration::hours(1));
    let soon = svc.create(soon).await.unwrap();

    let mut later = task_titled("due later");
    later.deadline = Some(Utc::now() + Duration::hours(25));
    svc.create(later).await.unwrap();

    svc.create(task_titled("no deadline")).await.unwrap();

    let close = svc.tasks_with_close_deadline().await.unwrap();
    assert_eq!(close.len(), 1);
    assert_eq!(close[0].id, soon.id);
}

#[tokio::test]
async fn task_update_merges_only_populated_fields() {
    let backend = TestBackend::new();
    let svc = &backend.state.task_service;

    let mut new = task_titled("write report");
    new.priority = TaskPriority::High;
    let task = svc.create(new).await.unwrap();

    let updated = svc
        .update_task(
            task.id,
            UpdateTask {
                status: Some(TaskStatus::Done),
                ..UpdateTask::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status, TaskStatus::Done);
    assert_eq!(updated.title, "write report");
    assert_eq!(updated.priority, TaskPriority::High);
}

#[tokio::test]
async fn updating_a_missing_task_is_not_found() {
    let backend = TestBackend::new();
    let err = backend
        .state
        .task_service
        .update_task(Uuid::new_v4(), UpdateTask::default())
        .await
        .unwrap_err();

    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    assert_eq!(err.public_message(), "Task not found");
}

#[tokio::test]
async fn assigning_roles_resolves_each_id_and_rejects_unknown_ones() {
    let backend = TestBackend::new();
    let user = backend
        .state
        .user_service
        .create(valid_user("alice", "alice@example.com"))
        .await
        .unwrap();

    let admin = backend
        .state
        .role_service
        .create(NewRole {
            name: "admin".to_string(),
        })
        .await
        .unwrap();

    let assigned = backend
        .state
        .user_service
        .assign_roles(user.id, vec![admin.id, admin.id])
        .await
        .unwrap();
    assert_eq!(assigned.roles.len(), 1);
    assert_eq!(assigned.roles[0].name, "admin");

    let err = backend
        .state
        .user_service
        .assign_roles(user.id, vec![Uuid::new_v4()])
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    assert_eq!(err.public_message(), "Role not found");
}

#[tokio::test]
async fn user_update_rehashes_an_incoming_password() {
    let backend = TestBackend::new();
    let svc = &backend.state.user_service;

    let user = svc
        .create(valid_user("alice", "alice@example.com"))
        .await
        .unwrap();
    let original_hash = user.password_hash.clone();

    let updated = svc
        .update_user(
            user.id,
            UpdateUser {
                password: Some("n3w-password".to_string()),
                ..UpdateUser::default()
            },
        )
        .await
        .unwrap();

    assert_ne!(updated.password_hash, original_hash);
    assert_ne!(updated.password_hash, "n3w-password");
    assert!(updated.password_hash.starts_with("$argon2"));
    assert_eq!(updated.username, "alice");
}

#[tokio::test]
async fn delete_is_idempotent_across_entities() {
    let backend = TestBackend::new();
    let task = backend
        .state
        .task_service
        .create(task_titled("ephemeral"))
        .await
        .unwrap();

    backend.state.task_service.delete_task(task.id).await.unwrap();
    backend.state.task_service.delete_task(task.id).await.unwrap();

    assert!(
        backend
            .state
            .task_service
            .find_by_id(task.id)
            .await
            .unwrap()
            .is_none()
    );
}
