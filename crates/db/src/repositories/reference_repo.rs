//! Repository for `refs` and the per-resource reference junctions.

use library_core::types::DbId;
use sqlx::PgPool;

use super::association_repo::{self, Referenceable};
use crate::models::reference::{CreateReference, Reference, UpdateReference};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, key, is_private, created_at, updated_at";

/// Provides reference CRUD plus attachment to referenceable resources.
pub struct ReferenceRepo;

impl ReferenceRepo {
    /// List all references, ordered by key.
    pub async fn list(pool: &PgPool) -> Result<Vec<Reference>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM refs ORDER BY key ASC, id ASC");
        sqlx::query_as::<_, Reference>(&query).fetch_all(pool).await
    }

    /// Create a reference. `is_private` defaults to `false`.
    pub async fn create(pool: &PgPool, input: &CreateReference) -> Result<Reference, sqlx::Error> {
        let query = format!(
            "INSERT INTO refs (key, is_private) VALUES ($1, COALESCE($2, false))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reference>(&query)
            .bind(input.key.trim())
            .bind(input.is_private)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Reference>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM refs WHERE id = $1");
        sqlx::query_as::<_, Reference>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a reference. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateReference,
    ) -> Result<Option<Reference>, sqlx::Error> {
        let query = format!(
            "UPDATE refs SET
                key = COALESCE($2, key),
                is_private = COALESCE($3, is_private)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reference>(&query)
            .bind(id)
            .bind(input.key.as_deref().map(str::trim))
            .bind(input.is_private)
            .fetch_optional(pool)
            .await
    }

    /// Delete a reference and its attachments.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM refs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// References attached to one resource, ordered by key.
    pub async fn refs_for<T: Referenceable>(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<Reference>, sqlx::Error> {
        let junction = T::REFS;
        let query = format!(
            "SELECT r.id, r.key, r.is_private, r.created_at, r.updated_at
             FROM {table} j
             JOIN refs r ON r.id = j.ref_id
             WHERE j.{owner} = $1
             ORDER BY r.key ASC, r.id ASC",
            table = junction.table,
            owner = junction.owner_column,
        );
        sqlx::query_as::<_, Reference>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Attach a reference. Returns `false` if it was already attached.
    pub async fn attach<T: Referenceable>(
        pool: &PgPool,
        owner_id: DbId,
        ref_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let added = association_repo::attach(&mut tx, T::REFS, owner_id, ref_id).await?;
        tx.commit().await?;
        Ok(added)
    }

    /// Detach a reference. Returns `false` if it was not attached.
    pub async fn detach<T: Referenceable>(
        pool: &PgPool,
        owner_id: DbId,
        ref_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let removed = association_repo::detach(&mut tx, T::REFS, owner_id, ref_id).await?;
        tx.commit().await?;
        Ok(removed)
    }
}
