//! Role repository for database operations

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use crate::models::{NewRole, Role};
use crate::repositories::{CrudRepository, RoleRepository};

/// Role repository backed by Postgres
#[derive(Clone)]
pub struct PgRoleRepository {
    pool: PgPool,
}

impl PgRoleRepository {
    /// Create a new role repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn role_from_row(row: &PgRow) -> Role {
    Role {
        id: row.get("id"),
        name: row.get("name"),
    }
}

#[async_trait]
impl CrudRepository<Role, Uuid, NewRole> for PgRoleRepository {
    async fn create(&self, new: NewRole) -> DatabaseResult<Role> {
        info!("Creating role: {}", new.name);

        let row = sqlx::query(
            r#"
            INSERT INTO roles (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(&new.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(role_from_row(&row))
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Role>> {
        let row = sqlx::query("SELECT id, name FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(role_from_row))
    }

    async fn find_all(&self) -> DatabaseResult<Vec<Role>> {
        let rows = sqlx::query("SELECT id, name FROM roles ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(role_from_row).collect())
    }

    async fn update(&self, id: Uuid, entity: Role) -> DatabaseResult<Option<Role>> {
        let row = sqlx::query(
            r#"
            UPDATE roles
            SET name = $2
            WHERE id = $1
            RETURNING id, name
            "#,
        )
        .bind(id)
        .bind(&entity.name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(role_from_row))
    }

    async fn delete_by_id(&self, id: Uuid) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn exists_by_id(&self, id: Uuid) -> DatabaseResult<bool> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM roles WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get::<bool, _>(0))
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    async fn exists_by_name(&self, name: &str) -> DatabaseResult<bool> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM roles WHERE name = $1)")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get::<bool, _>(0))
    }
}
