//! Option lists for the foreign-key `<select>` inputs on entity forms.

use sqlx::PgPool;

use crate::models::choice::{Choice, FormChoices};

/// Loads `(id, label)` pairs for select inputs.
pub struct ChoiceRepo;

impl ChoiceRepo {
    pub async fn universes(pool: &PgPool) -> Result<Vec<Choice>, sqlx::Error> {
        sqlx::query_as::<_, Choice>("SELECT id, title AS label FROM universes ORDER BY title")
            .fetch_all(pool)
            .await
    }

    pub async fn series(pool: &PgPool) -> Result<Vec<Choice>, sqlx::Error> {
        sqlx::query_as::<_, Choice>("SELECT id, title AS label FROM series ORDER BY title")
            .fetch_all(pool)
            .await
    }

    /// Authors labelled `First Last`, sorted by last name.
    pub async fn authors(pool: &PgPool) -> Result<Vec<Choice>, sqlx::Error> {
        sqlx::query_as::<_, Choice>(
            "SELECT id, concat_ws(' ', first_name, middle_name, last_name) AS label
             FROM authors
             ORDER BY last_name, first_name",
        )
        .fetch_all(pool)
        .await
    }

    /// Characters labelled with their name, for the alias parent select.
    pub async fn characters(pool: &PgPool) -> Result<Vec<Choice>, sqlx::Error> {
        sqlx::query_as::<_, Choice>(
            "SELECT id, trim(concat_ws(' ', first_name, last_name)) AS label
             FROM characters
             ORDER BY last_name, first_name",
        )
        .fetch_all(pool)
        .await
    }

    /// Every choice list at once.
    pub async fn all(pool: &PgPool) -> Result<FormChoices, sqlx::Error> {
        Ok(FormChoices {
            universes: Self::universes(pool).await?,
            series: Self::series(pool).await?,
            authors: Self::authors(pool).await?,
            characters: Self::characters(pool).await?,
        })
    }
}
