use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::models::user::User;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Applies the embedded schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")?;
    info!("Database migrations applied");
    Ok(())
}

/// Loads an active user of any role.
pub async fn require_active_user(pool: &PgPool, user_id: i64) -> Result<User, AppError> {
    sqlx::query_as::<_, User>(
        "SELECT id, email, full_name, user_type, is_active, created_at FROM users WHERE id = $1 AND is_active",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))
}

/// Loads an active user and checks their role.
pub async fn require_user_type(pool: &PgPool, user_id: i64, user_type: &str) -> Result<User, AppError> {
    let user = require_active_user(pool, user_id).await?;
    if user.user_type != user_type {
        return Err(AppError::Forbidden(format!("{user_type} access required")));
    }
    Ok(user)
}
