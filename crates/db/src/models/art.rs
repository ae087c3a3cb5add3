//! Art entity model and form.

use library_core::types::{DbId, Timestamp};
use library_core::validation::{normalize_optional, trim_in_place, Normalize};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `art` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Art {
    pub id: DbId,
    pub artist: String,
    pub title: String,
    pub description: Option<String>,
    /// Where the piece was found (URL, book, gallery).
    pub source: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Add/edit form for an art piece.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ArtForm {
    #[validate(length(min = 1, message = "This field is required."))]
    pub artist: String,
    #[validate(length(min = 1, message = "This field is required."))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "This field is required."))]
    pub source: String,
}

impl Normalize for ArtForm {
    fn normalize(&mut self) {
        trim_in_place(&mut self.artist);
        trim_in_place(&mut self.title);
        normalize_optional(&mut self.description);
        trim_in_place(&mut self.source);
    }
}

impl From<&Art> for ArtForm {
    fn from(row: &Art) -> Self {
        Self {
            artist: row.artist.clone(),
            title: row.title.clone(),
            description: row.description.clone(),
            source: row.source.clone(),
        }
    }
}
