//! Persistence layer for the catalogue.
//!
//! - [`models`]: row structs and form DTOs
//! - [`repositories`]: zero-sized `*Repo` structs with the SQL
//! - [`resource`]: the [`Resource`](resource::Resource) trait each catalogue
//!   entity implements
//! - [`crud`]: the shared add/edit/list/get/delete flow over any resource

use sqlx::postgres::PgPoolOptions;

pub mod constraint;
pub mod crud;
pub mod models;
pub mod repositories;
pub mod resource;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
