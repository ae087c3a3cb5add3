//! Store operations for the `universes` table.

use library_core::resource::ResourceKind;
use library_core::types::DbId;
use sqlx::PgConnection;

use crate::models::universe::{Universe, UniverseForm};
use crate::resource::Resource;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, created_at, updated_at";

impl Resource for Universe {
    type Form = UniverseForm;

    const KIND: ResourceKind = ResourceKind::Universe;
    const COLUMNS: &'static str = COLUMNS;
    const ORDER_BY: &'static str = "title ASC";
    const UNIQUE_FIELD: &'static str = "title";

    fn id(&self) -> DbId {
        self.id
    }

    fn display_name(&self) -> String {
        self.title.clone()
    }

    fn to_form(&self) -> UniverseForm {
        UniverseForm::from(self)
    }

    fn duplicate_message(form: &UniverseForm) -> String {
        format!("A universe titled \"{}\" already exists.", form.title)
    }

    async fn find_duplicate(
        conn: &mut PgConnection,
        form: &UniverseForm,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                 SELECT 1 FROM universes
                 WHERE title = $1 AND ($2::BIGINT IS NULL OR id <> $2)
             )",
        )
        .bind(&form.title)
        .bind(exclude_id)
        .fetch_one(&mut *conn)
        .await
    }

    async fn insert(conn: &mut PgConnection, form: &UniverseForm) -> Result<Universe, sqlx::Error> {
        let query = format!("INSERT INTO universes (title) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Universe>(&query)
            .bind(&form.title)
            .fetch_one(&mut *conn)
            .await
    }

    async fn update(
        conn: &mut PgConnection,
        id: DbId,
        form: &UniverseForm,
    ) -> Result<Universe, sqlx::Error> {
        let query = format!("UPDATE universes SET title = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Universe>(&query)
            .bind(id)
            .bind(&form.title)
            .fetch_one(&mut *conn)
            .await
    }
}
