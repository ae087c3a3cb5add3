//! Author and actor models, which share the same name shape.

use library_core::naming::full_name;
use library_core::types::{DbId, Timestamp};
use library_core::validation::{normalize_optional, trim_in_place, Normalize};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `authors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Author {
    pub id: DbId,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub suffix: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `actors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Actor {
    pub id: DbId,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub suffix: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Author {
    pub fn full_name(&self) -> String {
        full_name(
            &self.first_name,
            self.middle_name.as_deref(),
            &self.last_name,
            self.suffix.as_deref(),
        )
    }
}

impl Actor {
    pub fn full_name(&self) -> String {
        full_name(
            &self.first_name,
            self.middle_name.as_deref(),
            &self.last_name,
            self.suffix.as_deref(),
        )
    }
}

/// Add/edit form shared by authors and actors.
///
/// Middle name and suffix are optional and stored as `NULL` when blank.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct PersonForm {
    #[validate(length(min = 1, message = "This field is required."))]
    pub first_name: String,
    pub middle_name: Option<String>,
    #[validate(length(min = 1, message = "This field is required."))]
    pub last_name: String,
    pub suffix: Option<String>,
}

impl PersonForm {
    pub fn full_name(&self) -> String {
        full_name(
            &self.first_name,
            self.middle_name.as_deref(),
            &self.last_name,
            self.suffix.as_deref(),
        )
    }
}

impl Normalize for PersonForm {
    fn normalize(&mut self) {
        trim_in_place(&mut self.first_name);
        normalize_optional(&mut self.middle_name);
        trim_in_place(&mut self.last_name);
        normalize_optional(&mut self.suffix);
    }
}

impl From<&Author> for PersonForm {
    fn from(row: &Author) -> Self {
        Self {
            first_name: row.first_name.clone(),
            middle_name: row.middle_name.clone(),
            last_name: row.last_name.clone(),
            suffix: row.suffix.clone(),
        }
    }
}

impl From<&Actor> for PersonForm {
    fn from(row: &Actor) -> Self {
        Self {
            first_name: row.first_name.clone(),
            middle_name: row.middle_name.clone(),
            last_name: row.last_name.clone(),
            suffix: row.suffix.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use library_core::validation::normalize_and_validate;

    use super::*;

    #[test]
    fn blank_optionals_become_none() {
        let mut form = PersonForm {
            first_name: " Brandon ".into(),
            middle_name: Some(String::new()),
            last_name: "Sanderson".into(),
            suffix: Some("  ".into()),
        };
        normalize_and_validate(&mut form).unwrap();
        assert_eq!(form.first_name, "Brandon");
        assert_eq!(form.middle_name, None);
        assert_eq!(form.suffix, None);
        assert_eq!(form.full_name(), "Brandon Sanderson");
    }

    #[test]
    fn last_name_is_required() {
        let mut form = PersonForm {
            first_name: "Brandon".into(),
            ..Default::default()
        };
        let errors = normalize_and_validate(&mut form).unwrap_err();
        assert!(errors.contains("last_name"));
        assert!(!errors.contains("first_name"));
    }
}
