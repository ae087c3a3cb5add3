//! Series entity model and form.

use library_core::types::{DbId, Timestamp};
use library_core::validation::{empty_string_as_none, trim_in_place, Normalize};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `series` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Series {
    pub id: DbId,
    pub universe_id: Option<DbId>,
    pub title: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Add/edit form for a series. The universe is optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SeriesForm {
    #[serde(deserialize_with = "empty_string_as_none")]
    pub universe_id: Option<DbId>,
    #[validate(length(min = 1, message = "This field is required."))]
    pub title: String,
}

impl Normalize for SeriesForm {
    fn normalize(&mut self) {
        trim_in_place(&mut self.title);
    }
}

impl From<&Series> for SeriesForm {
    fn from(row: &Series) -> Self {
        Self {
            universe_id: row.universe_id,
            title: row.title.clone(),
        }
    }
}
