//! Store operations for the `series` table.

use library_core::resource::ResourceKind;
use library_core::types::DbId;
use library_core::validation::FieldErrors;
use sqlx::{PgConnection, PgPool};

use crate::models::series::{Series, SeriesForm};
use crate::resource::{check_link, Resource};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, universe_id, title, created_at, updated_at";

/// Series lookups beyond the generic CRUD flow.
pub struct SeriesRepo;

impl SeriesRepo {
    /// List the series set in a universe, ordered by title.
    pub async fn list_by_universe(
        pool: &PgPool,
        universe_id: DbId,
    ) -> Result<Vec<Series>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM series WHERE universe_id = $1 ORDER BY title ASC");
        sqlx::query_as::<_, Series>(&query)
            .bind(universe_id)
            .fetch_all(pool)
            .await
    }
}

impl Resource for Series {
    type Form = SeriesForm;

    const KIND: ResourceKind = ResourceKind::Series;
    const COLUMNS: &'static str = COLUMNS;
    const ORDER_BY: &'static str = "title ASC";
    const UNIQUE_FIELD: &'static str = "title";

    fn id(&self) -> DbId {
        self.id
    }

    fn display_name(&self) -> String {
        self.title.clone()
    }

    fn to_form(&self) -> SeriesForm {
        SeriesForm::from(self)
    }

    fn duplicate_message(form: &SeriesForm) -> String {
        format!("A series titled \"{}\" already exists.", form.title)
    }

    async fn find_duplicate(
        conn: &mut PgConnection,
        form: &SeriesForm,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                 SELECT 1 FROM series
                 WHERE title = $1 AND ($2::BIGINT IS NULL OR id <> $2)
             )",
        )
        .bind(&form.title)
        .bind(exclude_id)
        .fetch_one(&mut *conn)
        .await
    }

    async fn check_links(
        conn: &mut PgConnection,
        form: &SeriesForm,
        _id: Option<DbId>,
    ) -> Result<FieldErrors, sqlx::Error> {
        let mut errors = FieldErrors::new();
        check_link(conn, &mut errors, "universe_id", ResourceKind::Universe, form.universe_id)
            .await?;
        Ok(errors)
    }

    async fn insert(conn: &mut PgConnection, form: &SeriesForm) -> Result<Series, sqlx::Error> {
        let query = format!(
            "INSERT INTO series (universe_id, title) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Series>(&query)
            .bind(form.universe_id)
            .bind(&form.title)
            .fetch_one(&mut *conn)
            .await
    }

    async fn update(
        conn: &mut PgConnection,
        id: DbId,
        form: &SeriesForm,
    ) -> Result<Series, sqlx::Error> {
        let query = format!(
            "UPDATE series SET universe_id = $2, title = $3 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Series>(&query)
            .bind(id)
            .bind(form.universe_id)
            .bind(&form.title)
            .fetch_one(&mut *conn)
            .await
    }
}
