//! Options for the `<select>` inputs on entity forms.

use library_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// One `<option>`: an id and the label shown for it.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Choice {
    pub id: DbId,
    pub label: String,
}

/// Every choice list a form may need, loaded in one go.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormChoices {
    pub universes: Vec<Choice>,
    pub series: Vec<Choice>,
    pub authors: Vec<Choice>,
    pub characters: Vec<Choice>,
}
