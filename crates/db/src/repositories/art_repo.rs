//! Store operations for the `art` table.

use library_core::resource::ResourceKind;
use library_core::types::DbId;
use sqlx::PgConnection;

use crate::models::art::{Art, ArtForm};
use crate::resource::Resource;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, artist, title, description, source, created_at, updated_at";

impl Resource for Art {
    type Form = ArtForm;

    const KIND: ResourceKind = ResourceKind::Art;
    const COLUMNS: &'static str = COLUMNS;
    const ORDER_BY: &'static str = "title ASC, source ASC";
    const UNIQUE_FIELD: &'static str = "title";

    fn id(&self) -> DbId {
        self.id
    }

    fn display_name(&self) -> String {
        format!("{} ({})", self.title, self.artist)
    }

    fn to_form(&self) -> ArtForm {
        ArtForm::from(self)
    }

    fn duplicate_message(form: &ArtForm) -> String {
        format!(
            "Art titled \"{}\" from \"{}\" already exists.",
            form.title, form.source
        )
    }

    async fn find_duplicate(
        conn: &mut PgConnection,
        form: &ArtForm,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                 SELECT 1 FROM art
                 WHERE title = $1 AND source = $2 AND ($3::BIGINT IS NULL OR id <> $3)
             )",
        )
        .bind(&form.title)
        .bind(&form.source)
        .bind(exclude_id)
        .fetch_one(&mut *conn)
        .await
    }

    async fn insert(conn: &mut PgConnection, form: &ArtForm) -> Result<Art, sqlx::Error> {
        let query = format!(
            "INSERT INTO art (artist, title, description, source)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Art>(&query)
            .bind(&form.artist)
            .bind(&form.title)
            .bind(&form.description)
            .bind(&form.source)
            .fetch_one(&mut *conn)
            .await
    }

    async fn update(conn: &mut PgConnection, id: DbId, form: &ArtForm) -> Result<Art, sqlx::Error> {
        let query = format!(
            "UPDATE art SET artist = $2, title = $3, description = $4, source = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Art>(&query)
            .bind(id)
            .bind(&form.artist)
            .bind(&form.title)
            .bind(&form.description)
            .bind(&form.source)
            .fetch_one(&mut *conn)
            .await
    }
}
