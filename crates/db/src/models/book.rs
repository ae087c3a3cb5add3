//! Book entity model and form.

use library_core::types::{DbId, Timestamp};
use library_core::validation::{empty_string_as_none, trim_in_place, Normalize};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `books` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Book {
    pub id: DbId,
    pub universe_id: Option<DbId>,
    pub series_id: Option<DbId>,
    pub author_id: Option<DbId>,
    pub coauthor_id: Option<DbId>,
    pub title: String,
    /// Position of the book within its series.
    pub series_index: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Add/edit form for a book. Only the title is required.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct BookForm {
    #[serde(deserialize_with = "empty_string_as_none")]
    pub universe_id: Option<DbId>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub series_id: Option<DbId>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub author_id: Option<DbId>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub coauthor_id: Option<DbId>,
    #[validate(length(min = 1, message = "This field is required."))]
    pub title: String,
    #[serde(deserialize_with = "empty_string_as_none")]
    #[validate(range(min = 0, message = "Series number cannot be negative."))]
    pub series_index: Option<i32>,
}

impl Normalize for BookForm {
    fn normalize(&mut self) {
        trim_in_place(&mut self.title);
    }
}

impl From<&Book> for BookForm {
    fn from(row: &Book) -> Self {
        Self {
            universe_id: row.universe_id,
            series_id: row.series_id,
            author_id: row.author_id,
            coauthor_id: row.coauthor_id,
            title: row.title.clone(),
            series_index: row.series_index,
        }
    }
}
