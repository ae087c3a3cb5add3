//! SQL shared by `authors` and `actors`, which have identical name columns.

use library_core::types::DbId;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection};

use crate::models::person::PersonForm;

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str =
    "id, first_name, middle_name, last_name, suffix, created_at, updated_at";

pub(crate) const ORDER_BY: &str = "last_name ASC, first_name ASC";

pub(crate) async fn find_duplicate(
    conn: &mut PgConnection,
    table: &str,
    form: &PersonForm,
    exclude_id: Option<DbId>,
) -> Result<bool, sqlx::Error> {
    let query = format!(
        "SELECT EXISTS(
             SELECT 1 FROM {table}
             WHERE first_name = $1 AND last_name = $2 AND ($3::BIGINT IS NULL OR id <> $3)
         )"
    );
    sqlx::query_scalar::<_, bool>(&query)
        .bind(&form.first_name)
        .bind(&form.last_name)
        .bind(exclude_id)
        .fetch_one(&mut *conn)
        .await
}

pub(crate) async fn insert<T>(
    conn: &mut PgConnection,
    table: &str,
    form: &PersonForm,
) -> Result<T, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let query = format!(
        "INSERT INTO {table} (first_name, middle_name, last_name, suffix)
         VALUES ($1, $2, $3, $4)
         RETURNING {COLUMNS}"
    );
    sqlx::query_as::<_, T>(&query)
        .bind(&form.first_name)
        .bind(&form.middle_name)
        .bind(&form.last_name)
        .bind(&form.suffix)
        .fetch_one(&mut *conn)
        .await
}

pub(crate) async fn update<T>(
    conn: &mut PgConnection,
    table: &str,
    id: DbId,
    form: &PersonForm,
) -> Result<T, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let query = format!(
        "UPDATE {table} SET
            first_name = $2,
            middle_name = $3,
            last_name = $4,
            suffix = $5
         WHERE id = $1
         RETURNING {COLUMNS}"
    );
    sqlx::query_as::<_, T>(&query)
        .bind(id)
        .bind(&form.first_name)
        .bind(&form.middle_name)
        .bind(&form.last_name)
        .bind(&form.suffix)
        .fetch_one(&mut *conn)
        .await
}
