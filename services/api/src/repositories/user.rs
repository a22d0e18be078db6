//! User repository for database operations

use async_trait::async_trait;
use chrono::Utc;
use common::error::DatabaseResult;
use sqlx::{PgConnection, PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use crate::models::{NewUser, Role, User};
use crate::repositories::{CrudRepository, UserRepository};

/// User repository backed by Postgres
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn roles_of(&self, user_id: Uuid) -> DatabaseResult<Vec<Role>> {
        let rows = sqlx::query(
            r#"
            SELECT r.id, r.name
            FROM roles r
            JOIN user_roles ur ON ur.role_id = r.id
            WHERE ur.user_id = $1
            ORDER BY r.name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Role {
                id: row.get("id"),
                name: row.get("name"),
            })
            .collect())
    }
}

fn user_from_row(row: &PgRow, roles: Vec<Role>) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        roles,
    }
}

#[async_trait]
impl CrudRepository<User, Uuid, NewUser> for PgUserRepository {
    /// Insert a user row. By the time a payload reaches this layer its
    /// `password` field already holds the hash produced by the service.
    async fn create(&self, new: NewUser) -> DatabaseResult<User> {
        info!("Creating user: {}", new.username);

        let now = Utc::now();
        let row = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id, username, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(&new.username)
        .bind(&new.email)
        .bind(&new.password)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(user_from_row(&row, Vec::new()))
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let roles = self.roles_of(id).await?;
                Ok(Some(user_from_row(&row, roles)))
            }
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> DatabaseResult<Vec<User>> {
        let rows = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut users = Vec::with_capacity(rows.len());
        for row in &rows {
            let roles = self.roles_of(row.get("id")).await?;
            users.push(user_from_row(row, roles));
        }
        Ok(users)
    }

    /// Replace the user row and rewrite its role membership in one
    /// transaction, so a failure on either side leaves both untouched.
    async fn update(&self, id: Uuid, entity: User) -> DatabaseResult<Option<User>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            UPDATE users
            SET username = $2, email = $3, password_hash = $4, updated_at = $5
            WHERE id = $1
            RETURNING id, username, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&entity.username)
        .bind(&entity.email)
        .bind(&entity.password_hash)
        .bind(Utc::now())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let role_ids: Vec<Uuid> = entity.roles.iter().map(|r| r.id).collect();
        replace_roles(&mut *tx, id, &role_ids).await?;

        tx.commit().await?;

        Ok(Some(user_from_row(&row, entity.roles)))
    }

    async fn delete_by_id(&self, id: Uuid) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn exists_by_id(&self, id: Uuid) -> DatabaseResult<bool> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get::<bool, _>(0))
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn exists_by_username(&self, username: &str) -> DatabaseResult<bool> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get::<bool, _>(0))
    }

    async fn exists_by_email(&self, email: &str) -> DatabaseResult<bool> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get::<bool, _>(0))
    }
}

/// Rewrite a user's membership rows on the caller's transaction.
async fn replace_roles(
    conn: &mut PgConnection,
    user_id: Uuid,
    role_ids: &[Uuid],
) -> DatabaseResult<()> {
    sqlx::query("DELETE FROM user_roles WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

    for role_id in role_ids {
        sqlx::query(
            r#"
            INSERT INTO user_roles (user_id, role_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(role_id)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}
