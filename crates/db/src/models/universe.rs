//! Universe entity model and form.

use library_core::types::{DbId, Timestamp};
use library_core::validation::{trim_in_place, Normalize};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `universes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Universe {
    pub id: DbId,
    pub title: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Add/edit form for a universe.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UniverseForm {
    #[validate(length(min = 1, message = "This field is required."))]
    pub title: String,
}

impl Normalize for UniverseForm {
    fn normalize(&mut self) {
        trim_in_place(&mut self.title);
    }
}

impl From<&Universe> for UniverseForm {
    fn from(row: &Universe) -> Self {
        Self {
            title: row.title.clone(),
        }
    }
}
