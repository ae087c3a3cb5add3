//! Character entity model and form.
//!
//! A character always belongs to a series. It may be an alias of another
//! character through `parent_id`.

use library_core::naming::full_name;
use library_core::types::{DbId, Timestamp};
use library_core::validation::{empty_string_as_none, normalize_optional, trim_in_place, Normalize};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `characters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Character {
    pub id: DbId,
    pub universe_id: Option<DbId>,
    pub series_id: DbId,
    /// The character this one is an alias of.
    pub parent_id: Option<DbId>,
    pub first_name: String,
    /// Empty for single-name characters.
    pub last_name: String,
    pub suffix: Option<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Character {
    pub fn full_name(&self) -> String {
        full_name(
            &self.first_name,
            None,
            &self.last_name,
            self.suffix.as_deref(),
        )
    }
}

/// Add/edit form for a character.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CharacterForm {
    #[serde(deserialize_with = "empty_string_as_none")]
    pub universe_id: Option<DbId>,
    #[serde(deserialize_with = "empty_string_as_none")]
    #[validate(required(message = "This field is required."))]
    pub series_id: Option<DbId>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub parent_id: Option<DbId>,
    #[validate(length(min = 1, message = "This field is required."))]
    pub first_name: String,
    pub last_name: String,
    pub suffix: Option<String>,
    pub description: Option<String>,
}

impl Normalize for CharacterForm {
    fn normalize(&mut self) {
        trim_in_place(&mut self.first_name);
        trim_in_place(&mut self.last_name);
        normalize_optional(&mut self.suffix);
        normalize_optional(&mut self.description);
    }
}

impl From<&Character> for CharacterForm {
    fn from(row: &Character) -> Self {
        Self {
            universe_id: row.universe_id,
            series_id: Some(row.series_id),
            parent_id: row.parent_id,
            first_name: row.first_name.clone(),
            last_name: row.last_name.clone(),
            suffix: row.suffix.clone(),
            description: row.description.clone(),
        }
    }
}
