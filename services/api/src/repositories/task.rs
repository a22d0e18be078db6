//! Task repository for database operations

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use crate::models::{NewTask, Task, TaskPriority, TaskStatus};
use crate::repositories::{CrudRepository, TaskRepository};

/// Task repository backed by Postgres
#[derive(Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    /// Create a new task repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn task_from_row(row: &PgRow) -> DatabaseResult<Task> {
    let status: String = row.get("status");
    let priority: String = row.get("priority");
    Ok(Task {
        id: row.get("id"),
        title: row.get("title"),
        status: TaskStatus::parse(&status)
            .ok_or_else(|| DatabaseError::Decode(format!("unknown task status: {}", status)))?,
        priority: TaskPriority::parse(&priority)
            .ok_or_else(|| DatabaseError::Decode(format!("unknown task priority: {}", priority)))?,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        deadline: row.get("deadline"),
        assigned_to: row.get("assigned_to"),
    })
}

#[async_trait]
impl CrudRepository<Task, Uuid, NewTask> for PgTaskRepository {
    async fn create(&self, new: NewTask) -> DatabaseResult<Task> {
        info!("Creating task with title: {}", new.title);

        let now = Utc::now();
        let row = sqlx::query(
            r#"
            INSERT INTO tasks (title, status, priority, created_at, updated_at, deadline, assigned_to)
            VALUES ($1, $2, $3, $4, $4, $5, $6)
            RETURNING id, title, status, priority, created_at, updated_at, deadline, assigned_to
            "#,
        )
        .bind(&new.title)
        .bind(new.status.as_str())
        .bind(new.priority.as_str())
        .bind(now)
        .bind(new.deadline)
        .bind(new.assigned_to)
        .fetch_one(&self.pool)
        .await?;

        task_from_row(&row)
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Task>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, status, priority, created_at, updated_at, deadline, assigned_to
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(task_from_row).transpose()
    }

    async fn find_all(&self) -> DatabaseResult<Vec<Task>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, status, priority, created_at, updated_at, deadline, assigned_to
            FROM tasks
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(task_from_row).collect()
    }

    async fn update(&self, id: Uuid, entity: Task) -> DatabaseResult<Option<Task>> {
        let row = sqlx::query(
            r#"
            UPDATE tasks
            SET title = $2, status = $3, priority = $4, deadline = $5, assigned_to = $6, updated_at = $7
            WHERE id = $1
            RETURNING id, title, status, priority, created_at, updated_at, deadline, assigned_to
            "#,
        )
        .bind(id)
        .bind(&entity.title)
        .bind(entity.status.as_str())
        .bind(entity.priority.as_str())
        .bind(entity.deadline)
        .bind(entity.assigned_to)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(task_from_row).transpose()
    }

    async fn delete_by_id(&self, id: Uuid) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn exists_by_id(&self, id: Uuid) -> DatabaseResult<bool> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM tasks WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get::<bool, _>(0))
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn find_by_deadline_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DatabaseResult<Vec<Task>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, status, priority, created_at, updated_at, deadline, assigned_to
            FROM tasks
            WHERE deadline BETWEEN $1 AND $2
            ORDER BY deadline ASC
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(task_from_row).collect()
    }
}
