//! Store operations for the `books` table.

use library_core::resource::ResourceKind;
use library_core::types::DbId;
use library_core::validation::FieldErrors;
use sqlx::PgConnection;

use crate::models::book::{Book, BookForm};
use crate::resource::{check_link, Resource};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, universe_id, series_id, author_id, coauthor_id, title, series_index, \
                       created_at, updated_at";

impl Resource for Book {
    type Form = BookForm;

    const KIND: ResourceKind = ResourceKind::Book;
    const COLUMNS: &'static str = COLUMNS;
    const ORDER_BY: &'static str = "title ASC";
    const UNIQUE_FIELD: &'static str = "title";

    fn id(&self) -> DbId {
        self.id
    }

    fn display_name(&self) -> String {
        self.title.clone()
    }

    fn to_form(&self) -> BookForm {
        BookForm::from(self)
    }

    fn duplicate_message(form: &BookForm) -> String {
        format!("A book titled \"{}\" already exists.", form.title)
    }

    async fn find_duplicate(
        conn: &mut PgConnection,
        form: &BookForm,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                 SELECT 1 FROM books
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
        form: &BookForm,
        _id: Option<DbId>,
    ) -> Result<FieldErrors, sqlx::Error> {
        let mut errors = FieldErrors::new();
        check_link(conn, &mut errors, "universe_id", ResourceKind::Universe, form.universe_id)
            .await?;
        check_link(conn, &mut errors, "series_id", ResourceKind::Series, form.series_id).await?;
        check_link(conn, &mut errors, "author_id", ResourceKind::Author, form.author_id).await?;
        check_link(conn, &mut errors, "coauthor_id", ResourceKind::Author, form.coauthor_id)
            .await?;
        Ok(errors)
    }

    async fn insert(conn: &mut PgConnection, form: &BookForm) -> Result<Book, sqlx::Error> {
        let query = format!(
            "INSERT INTO books (universe_id, series_id, author_id, coauthor_id, title, series_index)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(form.universe_id)
            .bind(form.series_id)
            .bind(form.author_id)
            .bind(form.coauthor_id)
            .bind(&form.title)
            .bind(form.series_index)
            .fetch_one(&mut *conn)
            .await
    }

    async fn update(conn: &mut PgConnection, id: DbId, form: &BookForm) -> Result<Book, sqlx::Error> {
        let query = format!(
            "UPDATE books SET
                universe_id = $2,
                series_id = $3,
                author_id = $4,
                coauthor_id = $5,
                title = $6,
                series_index = $7
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(form.universe_id)
            .bind(form.series_id)
            .bind(form.author_id)
            .bind(form.coauthor_id)
            .bind(&form.title)
            .bind(form.series_index)
            .fetch_one(&mut *conn)
            .await
    }
}
