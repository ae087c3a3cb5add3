//! Repository for `tag_types`, `tags`, and the per-resource tag junctions.

use library_core::types::DbId;
use sqlx::PgPool;

use super::association_repo::{self, Taggable};
use crate::models::tag::{CreateTag, CreateTagType, Tag, TagType, TagWithType};

/// Column list for tag_types queries.
const TYPE_COLUMNS: &str = "id, name, created_at, updated_at";

/// Column list for tags queries.
const COLUMNS: &str = "id, tag_type_id, name, created_at, updated_at";

/// Provides tag type and tag CRUD plus attachment to taggable resources.
pub struct TagRepo;

impl TagRepo {
    // -----------------------------------------------------------------------
    // Tag types
    // -----------------------------------------------------------------------

    /// List all tag types, ordered by name.
    pub async fn list_types(pool: &PgPool) -> Result<Vec<TagType>, sqlx::Error> {
        let query = format!("SELECT {TYPE_COLUMNS} FROM tag_types ORDER BY name ASC");
        sqlx::query_as::<_, TagType>(&query).fetch_all(pool).await
    }

    /// Create a tag type, returning the created row.
    pub async fn create_type(pool: &PgPool, input: &CreateTagType) -> Result<TagType, sqlx::Error> {
        let query = format!("INSERT INTO tag_types (name) VALUES ($1) RETURNING {TYPE_COLUMNS}");
        sqlx::query_as::<_, TagType>(&query)
            .bind(input.name.trim())
            .fetch_one(pool)
            .await
    }

    pub async fn find_type(pool: &PgPool, id: DbId) -> Result<Option<TagType>, sqlx::Error> {
        let query = format!("SELECT {TYPE_COLUMNS} FROM tag_types WHERE id = $1");
        sqlx::query_as::<_, TagType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Tags
    // -----------------------------------------------------------------------

    /// List tags, optionally restricted to one tag type.
    pub async fn list(pool: &PgPool, tag_type_id: Option<DbId>) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tags
             WHERE ($1::BIGINT IS NULL OR tag_type_id = $1)
             ORDER BY name ASC"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(tag_type_id)
            .fetch_all(pool)
            .await
    }

    /// Create a tag, returning the created row.
    ///
    /// Fails with a `uq_tags_tag_type_id_name` violation if the type already
    /// has a tag with this name.
    pub async fn create(pool: &PgPool, input: &CreateTag) -> Result<Tag, sqlx::Error> {
        let query =
            format!("INSERT INTO tags (tag_type_id, name) VALUES ($1, $2) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Tag>(&query)
            .bind(input.tag_type_id)
            .bind(input.name.trim())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE id = $1");
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a tag and, through the junction cascade, its attachments.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Attachment
    // -----------------------------------------------------------------------

    /// Tags attached to one resource, with their type names.
    pub async fn tags_for<T: Taggable>(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<TagWithType>, sqlx::Error> {
        let junction = T::TAGS;
        let query = format!(
            "SELECT t.id, t.tag_type_id, tt.name AS tag_type_name, t.name
             FROM {table} j
             JOIN tags t ON t.id = j.tag_id
             JOIN tag_types tt ON tt.id = t.tag_type_id
             WHERE j.{owner} = $1
             ORDER BY tt.name ASC, t.name ASC",
            table = junction.table,
            owner = junction.owner_column,
        );
        sqlx::query_as::<_, TagWithType>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Whether a tag is attached to a resource.
    pub async fn is_tagged<T: Taggable>(
        pool: &PgPool,
        owner_id: DbId,
        tag_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        association_repo::is_attached(&mut conn, T::TAGS, owner_id, tag_id).await
    }

    /// Attach a tag. Returns `false` if it was already attached.
    pub async fn attach<T: Taggable>(
        pool: &PgPool,
        owner_id: DbId,
        tag_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let added = association_repo::attach(&mut tx, T::TAGS, owner_id, tag_id).await?;
        tx.commit().await?;
        Ok(added)
    }

    /// Detach a tag. Returns `false` if it was not attached.
    pub async fn detach<T: Taggable>(
        pool: &PgPool,
        owner_id: DbId,
        tag_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let removed = association_repo::detach(&mut tx, T::TAGS, owner_id, tag_id).await?;
        tx.commit().await?;
        Ok(removed)
    }

    /// Ids of the resources of type `T` carrying a tag.
    pub async fn tagged_with<T: Taggable>(
        pool: &PgPool,
        tag_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        association_repo::owners(&mut conn, T::TAGS, tag_id).await
    }
}
