//! Handlers for references and their attachments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use library_core::types::DbId;
use library_db::models::reference::{
    AttachReference, CreateReference, Reference, UpdateReference,
};
use library_db::repositories::{ReferenceRepo, Referenceable};
use validator::Validate;

use super::ensure_exists;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, SuccessResponse};
use crate::state::AppState;

/// GET /refs
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Reference>>>> {
    let refs = ReferenceRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: refs }))
}

/// POST /refs
///
/// `is_private` defaults to false.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateReference>,
) -> AppResult<(StatusCode, Json<DataResponse<Reference>>)> {
    input.validate().map_err(AppError::validation)?;

    let reference = ReferenceRepo::create(&state.pool, &input).await?;

    tracing::info!(ref_id = reference.id, user_id = auth.user_id, "Reference created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: reference })))
}

/// PUT /refs/{id}
///
/// Omitted fields keep their stored value.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(ref_id): Path<DbId>,
    Json(input): Json<UpdateReference>,
) -> AppResult<Json<DataResponse<Reference>>> {
    input.validate().map_err(AppError::validation)?;

    let reference = ReferenceRepo::update(&state.pool, ref_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Reference", ref_id))?;

    tracing::info!(ref_id, user_id = auth.user_id, "Reference updated");

    Ok(Json(DataResponse { data: reference }))
}

/// DELETE /refs/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(ref_id): Path<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    let deleted = ReferenceRepo::delete(&state.pool, ref_id).await?;
    if deleted {
        tracing::info!(ref_id, user_id = auth.user_id, "Reference deleted");
    }
    Ok(Json(SuccessResponse::from(deleted)))
}

// ---------------------------------------------------------------------------
// Attachments
// ---------------------------------------------------------------------------

/// GET /<slug>/{id}/refs
pub async fn list_for<T: Referenceable>(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(owner_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Reference>>>> {
    ensure_exists::<T>(&state, owner_id).await?;
    let refs = ReferenceRepo::refs_for::<T>(&state.pool, owner_id).await?;
    Ok(Json(DataResponse { data: refs }))
}

/// POST /<slug>/{id}/refs
pub async fn attach<T: Referenceable>(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(owner_id): Path<DbId>,
    Json(input): Json<AttachReference>,
) -> AppResult<Json<SuccessResponse>> {
    ensure_exists::<T>(&state, owner_id).await?;
    ReferenceRepo::find_by_id(&state.pool, input.ref_id)
        .await?
        .ok_or_else(|| AppError::not_found("Reference", input.ref_id))?;

    let added = ReferenceRepo::attach::<T>(&state.pool, owner_id, input.ref_id)
        .await
        .map_err(|e| AppError::missing_on_foreign_key(e, T::KIND.label(), owner_id))?;

    tracing::info!(
        resource = T::KIND.label(),
        id = owner_id,
        ref_id = input.ref_id,
        added,
        user_id = auth.user_id,
        "Reference attached",
    );

    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /<slug>/{id}/refs/{ref_id}
pub async fn detach<T: Referenceable>(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((owner_id, ref_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<SuccessResponse>> {
    let removed = ReferenceRepo::detach::<T>(&state.pool, owner_id, ref_id).await?;
    if removed {
        tracing::info!(
            resource = T::KIND.label(),
            id = owner_id,
            ref_id,
            user_id = auth.user_id,
            "Reference detached",
        );
    }
    Ok(Json(SuccessResponse::from(removed)))
}
