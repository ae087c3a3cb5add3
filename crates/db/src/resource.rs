//! The [`Resource`] trait: what the shared CRUD flow needs to know about one
//! catalogue entity type.
//!
//! Store operations take `&mut PgConnection` so [`crate::crud`] can run all
//! of them inside a single transaction and roll back on any failure.

use std::future::Future;

use library_core::resource::{AliasPolicy, ResourceKind};
use library_core::types::DbId;
use library_core::validation::{FieldErrors, Normalize};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection};
use validator::Validate;

/// A duplicate detected before or during a write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateEntry {
    /// Form field the message belongs to.
    pub field: &'static str,
    pub message: String,
}

/// One catalogue entity type served by the generic CRUD flow.
pub trait Resource:
    for<'r> FromRow<'r, PgRow> + Serialize + Clone + Send + Sync + Unpin + 'static
{
    /// Add/edit form. Edits replace every mutable field.
    type Form: Normalize + Validate + DeserializeOwned + Default + Clone + Send + Sync + 'static;

    const KIND: ResourceKind;

    /// Column list for `SELECT` and `RETURNING` clauses.
    const COLUMNS: &'static str;

    /// `ORDER BY` clause used for list pages.
    const ORDER_BY: &'static str;

    /// Form field that a unique violation is reported against.
    const UNIQUE_FIELD: &'static str;

    fn id(&self) -> DbId;

    /// Human-readable name shown in lists and page titles.
    fn display_name(&self) -> String;

    /// Prefill an edit form from the stored row.
    fn to_form(&self) -> Self::Form;

    /// Message shown when `form` collides with an existing row.
    fn duplicate_message(form: &Self::Form) -> String;

    /// Whether another row (other than `exclude_id`) has the same unique key.
    fn find_duplicate(
        conn: &mut PgConnection,
        form: &Self::Form,
        exclude_id: Option<DbId>,
    ) -> impl Future<Output = Result<bool, sqlx::Error>> + Send;

    /// Check that referenced rows exist. `id` is the row being edited.
    fn check_links(
        _conn: &mut PgConnection,
        _form: &Self::Form,
        _id: Option<DbId>,
    ) -> impl Future<Output = Result<FieldErrors, sqlx::Error>> + Send {
        async { Ok(FieldErrors::new()) }
    }

    fn insert(
        conn: &mut PgConnection,
        form: &Self::Form,
    ) -> impl Future<Output = Result<Self, sqlx::Error>> + Send;

    /// Replace all mutable fields of row `id`. The row must exist.
    fn update(
        conn: &mut PgConnection,
        id: DbId,
        form: &Self::Form,
    ) -> impl Future<Output = Result<Self, sqlx::Error>> + Send;

    /// Delete row `id`, returning whether it existed.
    ///
    /// Only characters look at `policy`.
    fn delete(
        conn: &mut PgConnection,
        id: DbId,
        _policy: AliasPolicy,
    ) -> impl Future<Output = Result<bool, sqlx::Error>> + Send {
        delete_row(conn, Self::KIND.table(), id)
    }

    fn duplicate_entry(form: &Self::Form) -> DuplicateEntry {
        DuplicateEntry {
            field: Self::UNIQUE_FIELD,
            message: Self::duplicate_message(form),
        }
    }
}

// ---------------------------------------------------------------------------
// Shared queries
// ---------------------------------------------------------------------------

/// All rows of `R` in display order.
pub async fn fetch_all<R: Resource>(conn: &mut PgConnection) -> Result<Vec<R>, sqlx::Error> {
    let query = format!(
        "SELECT {} FROM {} ORDER BY {}",
        R::COLUMNS,
        R::KIND.table(),
        R::ORDER_BY
    );
    sqlx::query_as::<_, R>(&query).fetch_all(&mut *conn).await
}

/// One row of `R` by id.
pub async fn fetch_by_id<R: Resource>(
    conn: &mut PgConnection,
    id: DbId,
) -> Result<Option<R>, sqlx::Error> {
    let query = format!(
        "SELECT {} FROM {} WHERE id = $1",
        R::COLUMNS,
        R::KIND.table()
    );
    sqlx::query_as::<_, R>(&query)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
}

/// One row of `R` by id, locked until the transaction ends.
pub async fn fetch_for_update<R: Resource>(
    conn: &mut PgConnection,
    id: DbId,
) -> Result<Option<R>, sqlx::Error> {
    let query = format!(
        "SELECT {} FROM {} WHERE id = $1 FOR UPDATE",
        R::COLUMNS,
        R::KIND.table()
    );
    sqlx::query_as::<_, R>(&query)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
}

/// Whether `table` has a row with `id`.
pub async fn row_exists(
    conn: &mut PgConnection,
    table: &str,
    id: DbId,
) -> Result<bool, sqlx::Error> {
    let query = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = $1)");
    sqlx::query_scalar::<_, bool>(&query)
        .bind(id)
        .fetch_one(&mut *conn)
        .await
}

/// Delete one row from `table`, returning whether it existed.
pub async fn delete_row(
    conn: &mut PgConnection,
    table: &'static str,
    id: DbId,
) -> Result<bool, sqlx::Error> {
    let query = format!("DELETE FROM {table} WHERE id = $1");
    let result = sqlx::query(&query).bind(id).execute(&mut *conn).await?;
    Ok(result.rows_affected() > 0)
}

/// Record an error on `field` when an optional foreign id points nowhere.
pub async fn check_link(
    conn: &mut PgConnection,
    errors: &mut FieldErrors,
    field: &str,
    kind: ResourceKind,
    id: Option<DbId>,
) -> Result<(), sqlx::Error> {
    if let Some(id) = id {
        if !row_exists(conn, kind.table(), id).await? {
            errors.add(field, format!("Selected {} does not exist.", kind.label().to_lowercase()));
        }
    }
    Ok(())
}
