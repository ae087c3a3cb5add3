//! Shared response envelope types for JSON handlers.
//!
//! Reads use a `{ "data": ... }` envelope. Writes on association and upload
//! endpoints answer with [`SuccessResponse`].

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "success": bool }` with an optional error or URL.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self::from(true)
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            url: None,
        }
    }

    pub fn uploaded(url: String) -> Self {
        Self {
            success: true,
            error: None,
            url: Some(url),
        }
    }
}

impl From<bool> for SuccessResponse {
    fn from(success: bool) -> Self {
        Self {
            success,
            error: None,
            url: None,
        }
    }
}
