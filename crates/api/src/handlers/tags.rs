//! Handlers for tag types, tags, and tag attachments.
//!
//! Attachment endpoints are generic over the [`Taggable`] resource and are
//! mounted under `/<slug>/{id}/tags` for each one.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use library_core::types::DbId;
use library_db::models::tag::{
    AttachTag, CreateTag, CreateTagType, Tag, TagListParams, TagType, TagWithType,
};
use library_db::repositories::{Taggable, TagRepo};
use validator::Validate;

use super::ensure_exists;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, SuccessResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Tag types
// ---------------------------------------------------------------------------

/// GET /tag-types
pub async fn list_types(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<TagType>>>> {
    let types = TagRepo::list_types(&state.pool).await?;
    Ok(Json(DataResponse { data: types }))
}

/// POST /tag-types
pub async fn create_type(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTagType>,
) -> AppResult<(StatusCode, Json<DataResponse<TagType>>)> {
    input.validate().map_err(AppError::validation)?;

    let tag_type = TagRepo::create_type(&state.pool, &input)
        .await
        .map_err(|e| {
            AppError::conflict_on_unique(e, || {
                format!("Tag type '{}' already exists.", input.name.trim())
            })
        })?;

    tracing::info!(tag_type_id = tag_type.id, user_id = auth.user_id, "Tag type created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: tag_type })))
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

/// GET /tags
///
/// All tags, optionally narrowed with `?tag_type_id=`.
pub async fn list_tags(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<TagListParams>,
) -> AppResult<Json<DataResponse<Vec<Tag>>>> {
    let tags = TagRepo::list(&state.pool, params.tag_type_id).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// POST /tags
pub async fn create_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTag>,
) -> AppResult<(StatusCode, Json<DataResponse<Tag>>)> {
    input.validate().map_err(AppError::validation)?;

    TagRepo::find_type(&state.pool, input.tag_type_id)
        .await?
        .ok_or_else(|| AppError::not_found("TagType", input.tag_type_id))?;

    let tag = TagRepo::create(&state.pool, &input).await.map_err(|e| {
        AppError::conflict_on_unique(e, || {
            format!("Tag '{}' already exists for this type.", input.name.trim())
        })
    })?;

    tracing::info!(tag_id = tag.id, user_id = auth.user_id, "Tag created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: tag })))
}

/// DELETE /tags/{id}
///
/// Removes the tag from everything it was attached to.
pub async fn delete_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(tag_id): Path<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    let deleted = TagRepo::delete(&state.pool, tag_id).await?;
    if deleted {
        tracing::info!(tag_id, user_id = auth.user_id, "Tag deleted");
    }
    Ok(Json(SuccessResponse::from(deleted)))
}

// ---------------------------------------------------------------------------
// Attachments
// ---------------------------------------------------------------------------

/// GET /<slug>/{id}/tags
pub async fn list_for<T: Taggable>(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(owner_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<TagWithType>>>> {
    ensure_exists::<T>(&state, owner_id).await?;
    let tags = TagRepo::tags_for::<T>(&state.pool, owner_id).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// POST /<slug>/{id}/tags
///
/// Attaching a tag that is already attached succeeds without a second row.
pub async fn attach<T: Taggable>(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(owner_id): Path<DbId>,
    Json(input): Json<AttachTag>,
) -> AppResult<Json<SuccessResponse>> {
    ensure_exists::<T>(&state, owner_id).await?;
    TagRepo::find_by_id(&state.pool, input.tag_id)
        .await?
        .ok_or_else(|| AppError::not_found("Tag", input.tag_id))?;

    let added = TagRepo::attach::<T>(&state.pool, owner_id, input.tag_id)
        .await
        .map_err(|e| AppError::missing_on_foreign_key(e, T::KIND.label(), owner_id))?;

    tracing::info!(
        resource = T::KIND.label(),
        id = owner_id,
        tag_id = input.tag_id,
        added,
        user_id = auth.user_id,
        "Tag attached",
    );

    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /<slug>/{id}/tags/{tag_id}
///
/// `success` is false when the tag was not attached.
pub async fn detach<T: Taggable>(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((owner_id, tag_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<SuccessResponse>> {
    let removed = TagRepo::detach::<T>(&state.pool, owner_id, tag_id).await?;
    if removed {
        tracing::info!(
            resource = T::KIND.label(),
            id = owner_id,
            tag_id,
            user_id = auth.user_id,
            "Tag detached",
        );
    }
    Ok(Json(SuccessResponse::from(removed)))
}
