//! JSON views of the book/character graph: appearances, aliases, and the
//! characters of a series.

use axum::extract::{Path, State};
use axum::Json;
use library_core::resource::ResourceKind;
use library_core::types::DbId;
use library_db::models::appearance::AttachCharacter;
use library_db::models::book::Book;
use library_db::models::character::Character;
use library_db::models::series::Series;
use library_db::repositories::{AppearanceRepo, CharacterRepo};

use super::ensure_exists;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, SuccessResponse};
use crate::state::AppState;

/// GET /books/{id}/characters
pub async fn characters_in_book(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(book_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Character>>>> {
    ensure_exists::<Book>(&state, book_id).await?;
    let characters = AppearanceRepo::characters_in_book(&state.pool, book_id).await?;
    Ok(Json(DataResponse { data: characters }))
}

/// POST /books/{id}/characters
///
/// Listing a character twice keeps a single appearance.
pub async fn attach_character(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(book_id): Path<DbId>,
    Json(input): Json<AttachCharacter>,
) -> AppResult<Json<SuccessResponse>> {
    ensure_exists::<Book>(&state, book_id).await?;
    ensure_exists::<Character>(&state, input.character_id).await?;

    let added = AppearanceRepo::attach(&state.pool, book_id, input.character_id)
        .await
        .map_err(|e| AppError::missing_on_foreign_key(e, ResourceKind::Book.label(), book_id))?;

    tracing::info!(
        book_id,
        character_id = input.character_id,
        added,
        user_id = auth.user_id,
        "Character appearance recorded",
    );

    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /books/{id}/characters/{character_id}
pub async fn detach_character(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((book_id, character_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<SuccessResponse>> {
    let removed = AppearanceRepo::detach(&state.pool, book_id, character_id).await?;
    if removed {
        tracing::info!(
            book_id,
            character_id,
            user_id = auth.user_id,
            "Character appearance removed",
        );
    }
    Ok(Json(SuccessResponse::from(removed)))
}

/// GET /characters/{id}/books
pub async fn books_for_character(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(character_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Book>>>> {
    ensure_exists::<Character>(&state, character_id).await?;
    let books = AppearanceRepo::books_for_character(&state.pool, character_id).await?;
    Ok(Json(DataResponse { data: books }))
}

/// GET /characters/{id}/aliases
///
/// Direct aliases only.
pub async fn aliases(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(character_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Character>>>> {
    ensure_exists::<Character>(&state, character_id).await?;
    let aliases = CharacterRepo::aliases(&state.pool, character_id).await?;
    Ok(Json(DataResponse { data: aliases }))
}

/// GET /series/{id}/characters
pub async fn characters_in_series(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(series_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Character>>>> {
    ensure_exists::<Series>(&state, series_id).await?;
    let characters = CharacterRepo::list_by_series(&state.pool, series_id).await?;
    Ok(Json(DataResponse { data: characters }))
}
