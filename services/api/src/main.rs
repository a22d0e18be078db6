use anyhow::Result;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use common::database::{DatabaseConfig, init_pool};
use tokio::net::TcpListener;

use api::database::init_schema;
use api::repositories::{PgRoleRepository, PgTaskRepository, PgUserRepository};
use api::routes::create_router;
use api::security::ArgonPasswordHasher;
use api::services::{RoleService, TaskService, UserService};
use api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting API service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    init_schema(&pool).await?;

    info!("API service initialized successfully");

    // Initialize repositories
    let task_repository = Arc::new(PgTaskRepository::new(pool.clone()));
    let user_repository = Arc::new(PgUserRepository::new(pool.clone()));
    let role_repository = Arc::new(PgRoleRepository::new(pool));

    let password_hasher = Arc::new(ArgonPasswordHasher::default());

    let app_state = AppState {
        task_service: Arc::new(TaskService::new(
            task_repository,
            user_repository.clone(),
        )),
        user_service: Arc::new(UserService::new(
            user_repository,
            role_repository.clone(),
            password_hasher,
        )),
        role_service: Arc::new(RoleService::new(role_repository)),
    };

    // Start the web server
    let app = create_router(app_state);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".to_string());
    let listener = TcpListener::bind(&bind_addr).await?;
    info!("API service listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
