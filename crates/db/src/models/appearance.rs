//! Book <-> character appearances.

use library_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `appearances` junction table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Appearance {
    pub book_id: DbId,
    pub character_id: DbId,
    pub created_at: Timestamp,
}

/// Body of `POST /books/{id}/characters`.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachCharacter {
    pub character_id: DbId,
}
