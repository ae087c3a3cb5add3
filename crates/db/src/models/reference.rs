//! References: external citations attachable to actors, art, and characters.

use library_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `refs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reference {
    pub id: DbId,
    pub key: String,
    pub is_private: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new reference.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReference {
    #[validate(length(min = 1, message = "This field is required."))]
    pub key: String,
    /// Defaults to `false` when omitted.
    pub is_private: Option<bool>,
}

/// DTO for updating a reference. Only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateReference {
    #[validate(length(min = 1, message = "This field is required."))]
    pub key: Option<String>,
    pub is_private: Option<bool>,
}

/// Body of `POST /<referenceable>/{id}/refs`.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachReference {
    pub ref_id: DbId,
}
