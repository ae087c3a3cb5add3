//! Generic page handlers shared by every catalogue resource.
//!
//! Each function is instantiated once per resource type in
//! [`routes::catalog`](crate::routes::catalog):
//!
//! | Method | Path                  | Handler          |
//! |--------|-----------------------|------------------|
//! | GET    | `/<slug>`             | [`list`]         |
//! | GET    | `/<slug>/add`         | [`add_form`]     |
//! | POST   | `/<slug>/add`         | [`add`]          |
//! | GET    | `/<slug>/{id}`        | [`show`]         |
//! | GET    | `/<slug>/{id}/edit`   | [`edit_form`]    |
//! | POST   | `/<slug>/{id}/edit`   | [`edit`]         |
//! | DELETE | `/<slug>/{id}`        | [`delete`]       |

use axum::extract::rejection::FormRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use library_core::resource::{AliasPolicy, ResourceKind};
use library_core::types::DbId;
use library_core::validation::FieldErrors;
use library_db::crud::{self, Deletion, Submission};
use library_db::models::choice::FormChoices;
use library_db::repositories::{AppearanceRepo, CharacterRepo, ChoiceRepo, SeriesRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::SuccessResponse;
use crate::state::AppState;
use crate::views::forms::{self, FormView, FORM_ERROR};
use crate::views::layout;
use crate::views::tables::{self, ResourceView};

/// Reason given when a delete fails for anything other than a missing or
/// referenced row.
pub const DELETE_FAILED: &str = "Delete failed.";

/// Query string accepted by [`delete`].
#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    /// Overrides the configured alias policy for this request.
    pub cascade: Option<bool>,
}

impl DeleteParams {
    pub fn policy(&self, default: AliasPolicy) -> AliasPolicy {
        match self.cascade {
            Some(true) => AliasPolicy::Cascade,
            Some(false) => AliasPolicy::Restrict,
            None => default,
        }
    }
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// GET /<slug>
pub async fn list<R: ResourceView>(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Html<String>> {
    let rows = crud::list::<R>(&state.pool).await?;
    let choices = choices_for::<R>(&state).await?;

    let body = tables::render_list(&rows, &choices);
    Ok(Html(layout::page(
        R::KIND.plural_label(),
        Some(&user.username),
        &body,
    )))
}

/// GET /<slug>/{id}
pub async fn show<R: ResourceView>(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Html<String>> {
    let row = find::<R>(&state, id).await?;
    let choices = choices_for::<R>(&state).await?;

    let related = related_sections(&state, R::KIND, id).await?;
    let body = tables::render_detail(&row, &choices, &related);
    Ok(Html(layout::page(
        &row.display_name(),
        Some(&user.username),
        &body,
    )))
}

/// GET /<slug>/add
pub async fn add_form<R: ResourceView>(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Html<String>> {
    let choices = choices_for::<R>(&state).await?;
    let form = R::Form::default();
    Ok(Html(form_page::<R>(
        &user,
        &form,
        &choices,
        &FieldErrors::new(),
        None,
        None,
    )))
}

/// GET /<slug>/{id}/edit
pub async fn edit_form<R: ResourceView>(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Html<String>> {
    let row = find::<R>(&state, id).await?;
    let choices = choices_for::<R>(&state).await?;
    let form = row.to_form();
    Ok(Html(form_page::<R>(
        &user,
        &form,
        &choices,
        &FieldErrors::new(),
        None,
        Some(id),
    )))
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// POST /<slug>/add
///
/// 303 to the new row on success. A rejected form is rendered again with
/// 422 (invalid or unreadable) or 409 (duplicate).
pub async fn add<R: ResourceView>(
    user: AuthUser,
    State(state): State<AppState>,
    form: Result<Form<R::Form>, FormRejection>,
) -> AppResult<Response> {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => return unreadable::<R>(&state, &user, rejection, None).await,
    };
    let submitted = form.clone();
    let outcome = crud::add::<R>(&state.pool, form).await?;
    respond::<R>(&state, &user, &submitted, outcome, None).await
}

/// POST /<slug>/{id}/edit
///
/// Same outcomes as [`add`], plus 404 when the row does not exist.
pub async fn edit<R: ResourceView>(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    form: Result<Form<R::Form>, FormRejection>,
) -> AppResult<Response> {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => return unreadable::<R>(&state, &user, rejection, Some(id)).await,
    };
    let submitted = form.clone();
    let outcome = crud::edit::<R>(&state.pool, id, form)
        .await?
        .ok_or_else(|| AppError::not_found(R::KIND.label(), id))?;
    respond::<R>(&state, &user, &submitted, outcome, Some(id)).await
}

/// DELETE /<slug>/{id}
///
/// Always answers `{ "success": bool }`. A missing row, a still-referenced
/// row or a store fault is reported with `success: false` and a reason.
pub async fn delete<R: ResourceView>(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<DeleteParams>,
) -> AppResult<Json<SuccessResponse>> {
    let policy = params.policy(state.config.alias_policy);
    let label = R::KIND.label();

    let response = match crud::delete::<R>(&state.pool, id, policy).await {
        Ok(Deletion::Deleted) => {
            tracing::info!(
                resource = label,
                id,
                user_id = user.user_id,
                policy = policy.as_str(),
                "Resource deleted",
            );
            SuccessResponse::ok()
        }
        Ok(Deletion::NotFound) => SuccessResponse::failed(format!("{label} {id} not found.")),
        Ok(Deletion::Blocked(reason)) => SuccessResponse::failed(reason),
        // Already rolled back and logged by the store.
        Err(_) => SuccessResponse::failed(DELETE_FAILED),
    };

    Ok(Json(response))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find<R: ResourceView>(state: &AppState, id: DbId) -> AppResult<R> {
    crud::get::<R>(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(R::KIND.label(), id))
}

/// Select choices, loaded only for resources whose form has dropdowns.
async fn choices_for<R: ResourceView>(state: &AppState) -> AppResult<FormChoices> {
    if <R::Form as FormView>::NEEDS_CHOICES {
        Ok(ChoiceRepo::all(&state.pool).await?)
    } else {
        Ok(FormChoices::default())
    }
}

/// Rows linked to `id` that the detail page lists under its fields.
async fn related_sections(state: &AppState, kind: ResourceKind, id: DbId) -> AppResult<String> {
    let pool = &state.pool;
    let html = match kind {
        ResourceKind::Universe => {
            let series = SeriesRepo::list_by_universe(pool, id).await?;
            tables::render_related("Series", &tables::row_links(&series))
        }
        ResourceKind::Series => {
            let characters = CharacterRepo::list_by_series(pool, id).await?;
            tables::render_related("Characters", &tables::row_links(&characters))
        }
        ResourceKind::Book => {
            let characters = AppearanceRepo::characters_in_book(pool, id).await?;
            tables::render_related("Characters", &tables::row_links(&characters))
        }
        ResourceKind::Character => {
            let aliases = CharacterRepo::aliases(pool, id).await?;
            let books = AppearanceRepo::books_for_character(pool, id).await?;
            tables::render_related("Aliases", &tables::row_links(&aliases))
                + &tables::render_related("Appears in", &tables::row_links(&books))
        }
        ResourceKind::Actor | ResourceKind::Art | ResourceKind::Author => String::new(),
    };
    Ok(html)
}

/// A body whose values do not parse is shown as a form-level error on a
/// fresh form (add) or the stored row (edit). Other rejections pass through.
async fn unreadable<R: ResourceView>(
    state: &AppState,
    user: &AuthUser,
    rejection: FormRejection,
    id: Option<DbId>,
) -> AppResult<Response> {
    if !matches!(
        rejection,
        FormRejection::FailedToDeserializeForm(_) | FormRejection::FailedToDeserializeFormBody(_)
    ) {
        return Ok(rejection.into_response());
    }

    let form = match id {
        Some(id) => find::<R>(state, id).await?.to_form(),
        None => R::Form::default(),
    };
    let message = rejection.body_text();
    tracing::debug!(resource = R::KIND.label(), error = %message, "Unreadable form body");

    let mut errors = FieldErrors::new();
    errors.add(FORM_ERROR, message);
    let choices = choices_for::<R>(state).await?;
    let html = form_page::<R>(user, &form, &choices, &errors, None, id);
    Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response())
}

/// Redirect after a save, otherwise render the form again.
async fn respond<R: ResourceView>(
    state: &AppState,
    user: &AuthUser,
    submitted: &R::Form,
    outcome: Submission<R>,
    id: Option<DbId>,
) -> AppResult<Response> {
    let (status, errors, flash) = match outcome {
        Submission::Saved(row) => {
            let action = if id.is_some() { "updated" } else { "created" };
            tracing::info!(
                resource = R::KIND.label(),
                id = row.id(),
                user_id = user.user_id,
                action,
                "Resource saved",
            );
            let location = format!("/{}/{}", R::KIND.slug(), row.id());
            return Ok(Redirect::to(&location).into_response());
        }
        Submission::Invalid(errors) => (StatusCode::UNPROCESSABLE_ENTITY, errors, None),
        Submission::Duplicate(entry) => {
            let mut errors = FieldErrors::new();
            errors.add(entry.field, entry.message.clone());
            let flash = format!("Duplicate entry: {}", entry.message);
            (StatusCode::CONFLICT, errors, Some(flash))
        }
    };

    let choices = choices_for::<R>(state).await?;
    let html = form_page::<R>(user, submitted, &choices, &errors, flash.as_deref(), id);
    Ok((status, Html(html)).into_response())
}

fn form_page<R: ResourceView>(
    user: &AuthUser,
    form: &R::Form,
    choices: &FormChoices,
    errors: &FieldErrors,
    flash: Option<&str>,
    id: Option<DbId>,
) -> String {
    let slug = R::KIND.slug();
    let label = R::KIND.label();
    let (title, action) = match id {
        None => (format!("Add {label}"), format!("/{slug}/add")),
        Some(id) => (format!("Edit {label}"), format!("/{slug}/{id}/edit")),
    };

    let mut body = flash.map(layout::flash).unwrap_or_default();
    body.push_str(&forms::render_form(
        &action,
        &form.fields(choices),
        errors,
        "Submit",
    ));
    if let Some(id) = id {
        body.push_str(&forms::delete_button(
            &format!("/{slug}/{id}"),
            &format!("/{slug}"),
        ));
    }

    layout::page(&title, Some(&user.username), &body)
}
