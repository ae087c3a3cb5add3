//! Tag types, tags, and tag attachment DTOs.

use library_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `tag_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TagType {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `tags` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub tag_type_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A tag joined with its type name, as shown on an entity.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TagWithType {
    pub id: DbId,
    pub tag_type_id: DbId,
    pub tag_type_name: String,
    pub name: String,
}

/// DTO for creating a new tag type.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTagType {
    #[validate(length(min = 1, message = "This field is required."))]
    pub name: String,
}

/// DTO for creating a new tag.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTag {
    pub tag_type_id: DbId,
    #[validate(length(min = 1, message = "This field is required."))]
    pub name: String,
}

/// Body of `POST /<taggable>/{id}/tags`.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachTag {
    pub tag_id: DbId,
}

/// Query parameters for `GET /tags`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagListParams {
    pub tag_type_id: Option<DbId>,
}
