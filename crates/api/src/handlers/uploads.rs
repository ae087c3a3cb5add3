//! Upload relay to the configured object store.
//!
//! Storage faults never fail the request: they are logged and reported as
//! `{ "success": false, "error": ... }`.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use library_storage::sanitize_key;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::SuccessResponse;
use crate::state::AppState;

const STORAGE_DISABLED: &str = "Uploads are not configured.";

/// POST /uploads
///
/// Multipart body with a `file` field. The object key is the sanitized
/// file name; the response carries the public URL.
pub async fn upload(
    auth: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<SuccessResponse>> {
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        file = Some((file_name, content_type, data.to_vec()));
    }

    let (file_name, content_type, data) =
        file.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    let Some(store) = &state.storage else {
        tracing::warn!(file_name = %file_name, "Upload rejected, no object store configured");
        return Ok(Json(SuccessResponse::failed(STORAGE_DISABLED)));
    };

    let key = match sanitize_key(&file_name) {
        Ok(key) => key,
        Err(e) => return Ok(Json(SuccessResponse::failed(e.to_string()))),
    };

    let size = data.len();
    match store.upload(&key, data, &content_type).await {
        Ok(url) => {
            tracing::info!(key = %key, size, user_id = auth.user_id, "File uploaded");
            Ok(Json(SuccessResponse::uploaded(url)))
        }
        Err(e) => {
            tracing::error!(key = %key, error = %e, "Upload failed");
            Ok(Json(SuccessResponse::failed(e.to_string())))
        }
    }
}

/// DELETE /uploads/{key}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<Json<SuccessResponse>> {
    let Some(store) = &state.storage else {
        return Ok(Json(SuccessResponse::failed(STORAGE_DISABLED)));
    };

    let key = match sanitize_key(&key) {
        Ok(key) => key,
        Err(e) => return Ok(Json(SuccessResponse::failed(e.to_string()))),
    };

    match store.delete(&key).await {
        Ok(()) => {
            tracing::info!(key = %key, user_id = auth.user_id, "File deleted");
            Ok(Json(SuccessResponse::ok()))
        }
        Err(e) => {
            tracing::error!(key = %key, error = %e, "Delete from object store failed");
            Ok(Json(SuccessResponse::failed(e.to_string())))
        }
    }
}
