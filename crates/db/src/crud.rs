//! The add/edit/list/get/delete flow shared by every [`Resource`].
//!
//! Each write runs in its own transaction. Duplicates and validation
//! failures come back as values so the caller can re-render the form;
//! anything else is rolled back, logged, and returned as `Err`.

use library_core::resource::AliasPolicy;
use library_core::types::DbId;
use library_core::validation::{normalize_and_validate, FieldErrors};
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::constraint;
use crate::resource::{self, DuplicateEntry, Resource};

/// Outcome of an add or edit submission.
#[derive(Debug)]
pub enum Submission<R> {
    Saved(R),
    /// Field-level problems; nothing was written.
    Invalid(FieldErrors),
    /// The unique key is already taken; nothing was written.
    Duplicate(DuplicateEntry),
}

/// Outcome of a delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deletion {
    Deleted,
    NotFound,
    /// Another row still references this one.
    Blocked(String),
}

impl Deletion {
    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted)
    }
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// All rows of `R`, ordered for display.
pub async fn list<R: Resource>(pool: &PgPool) -> Result<Vec<R>, sqlx::Error> {
    let mut conn = pool.acquire().await?;
    resource::fetch_all::<R>(&mut conn).await
}

/// One row of `R`, or `None` if no row has `id`.
pub async fn get<R: Resource>(pool: &PgPool, id: DbId) -> Result<Option<R>, sqlx::Error> {
    let mut conn = pool.acquire().await?;
    resource::fetch_by_id::<R>(&mut conn, id).await
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Validate `form` and insert a new row.
pub async fn add<R: Resource>(
    pool: &PgPool,
    mut form: R::Form,
) -> Result<Submission<R>, sqlx::Error> {
    if let Err(errors) = normalize_and_validate(&mut form) {
        return Ok(Submission::Invalid(errors));
    }

    let mut tx = pool.begin().await?;
    let outcome = write::<R>(&mut tx, None, &form).await;
    finish(tx, outcome, R::KIND.label(), "add").await
}

/// Validate `form` and replace the mutable fields of row `id`.
///
/// Returns `Ok(None)` when no row has `id`; nothing is written in that case.
pub async fn edit<R: Resource>(
    pool: &PgPool,
    id: DbId,
    mut form: R::Form,
) -> Result<Option<Submission<R>>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    match resource::fetch_for_update::<R>(&mut tx, id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            tx.rollback().await?;
            return Ok(None);
        }
        Err(err) => {
            rollback_after(tx, &err, R::KIND.label(), "edit").await;
            return Err(err);
        }
    }

    if let Err(errors) = normalize_and_validate(&mut form) {
        tx.rollback().await?;
        return Ok(Some(Submission::Invalid(errors)));
    }

    let outcome = write::<R>(&mut tx, Some(id), &form).await;
    finish(tx, outcome, R::KIND.label(), "edit").await.map(Some)
}

/// Delete row `id` of `R`.
///
/// A foreign-key restriction is reported as [`Deletion::Blocked`].
pub async fn delete<R: Resource>(
    pool: &PgPool,
    id: DbId,
    policy: AliasPolicy,
) -> Result<Deletion, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let label = R::KIND.label();

    match R::delete(&mut tx, id, policy).await {
        Ok(true) => {
            tx.commit().await?;
            Ok(Deletion::Deleted)
        }
        Ok(false) => {
            tx.rollback().await?;
            Ok(Deletion::NotFound)
        }
        Err(err) => {
            if let Some(constraint) = constraint::foreign_key_violation(&err) {
                tracing::warn!(resource = label, id, constraint, "Delete blocked by reference");
                let reason = format!("{label} {id} is still referenced ({constraint}).");
                tx.rollback().await?;
                return Ok(Deletion::Blocked(reason));
            }
            rollback_after(tx, &err, label, "delete").await;
            Err(err)
        }
    }
}

/// Link checks, duplicate pre-check, then insert or update.
async fn write<R: Resource>(
    conn: &mut PgConnection,
    id: Option<DbId>,
    form: &R::Form,
) -> Result<Submission<R>, sqlx::Error> {
    let errors = R::check_links(conn, form, id).await?;
    if !errors.is_empty() {
        return Ok(Submission::Invalid(errors));
    }

    if R::find_duplicate(conn, form, id).await? {
        return Ok(Submission::Duplicate(R::duplicate_entry(form)));
    }

    let result = match id {
        None => R::insert(conn, form).await,
        Some(id) => R::update(conn, id, form).await,
    };

    match result {
        Ok(row) => Ok(Submission::Saved(row)),
        // Lost a race with a concurrent writer after the pre-check.
        Err(err) if constraint::unique_violation(&err).is_some() => {
            Ok(Submission::Duplicate(R::duplicate_entry(form)))
        }
        Err(err) => Err(err),
    }
}

/// Commit a saved submission, roll back everything else.
async fn finish<R: Resource>(
    tx: Transaction<'_, Postgres>,
    outcome: Result<Submission<R>, sqlx::Error>,
    label: &'static str,
    action: &'static str,
) -> Result<Submission<R>, sqlx::Error> {
    match outcome {
        Ok(Submission::Saved(row)) => {
            tx.commit().await?;
            Ok(Submission::Saved(row))
        }
        Ok(Submission::Duplicate(entry)) => {
            tracing::warn!(resource = label, action, field = entry.field, "Duplicate entry");
            tx.rollback().await?;
            Ok(Submission::Duplicate(entry))
        }
        Ok(other) => {
            tx.rollback().await?;
            Ok(other)
        }
        Err(err) => {
            rollback_after(tx, &err, label, action).await;
            Err(err)
        }
    }
}

/// Roll back after a fault, logging both the fault and any rollback failure.
async fn rollback_after(
    tx: Transaction<'_, Postgres>,
    err: &sqlx::Error,
    label: &'static str,
    action: &'static str,
) {
    tracing::error!(resource = label, action, error = %err, "Rolling back failed write");
    if let Err(rollback_err) = tx.rollback().await {
        tracing::error!(resource = label, action, error = %rollback_err, "Rollback failed");
    }
}
