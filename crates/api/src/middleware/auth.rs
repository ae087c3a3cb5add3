//! Session extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use library_core::types::DbId;

use crate::auth::jwt::{validate_token, JwtConfig};
use crate::state::AppState;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "library_session";

/// Authenticated user extracted from the session cookie or a Bearer token.
///
/// Every catalogue handler takes this as a parameter:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Html<String>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    pub username: String,
}

/// Rejection for unauthenticated requests: 303 to the login page.
#[derive(Debug)]
pub struct AuthRedirect {
    /// Path (and query) the user was trying to reach.
    pub next: String,
}

impl AuthRedirect {
    pub fn location(&self) -> String {
        format!("/auth/login?next={}", urlencoding::encode(&self.next))
    }
}

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        Redirect::to(&self.location()).into_response()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let next = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| "/".to_string());

        let Some(token) = session_token(parts) else {
            return Err(AuthRedirect { next });
        };

        match validate_token(&token, &state.config.jwt) {
            Ok(claims) => Ok(AuthUser {
                user_id: claims.sub,
                username: claims.username,
            }),
            Err(e) => {
                tracing::debug!(error = %e, "Rejected session token");
                Err(AuthRedirect { next })
            }
        }
    }
}

/// Token from `Authorization: Bearer`, falling back to the session cookie.
fn session_token(parts: &Parts) -> Option<String> {
    if let Some(token) = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        return Some(token.trim().to_string());
    }

    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value that stores a new session token.
pub fn session_cookie(token: &str, config: &JwtConfig) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        config.session_max_age_secs()
    )
}

/// `Set-Cookie` value that clears the session.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Only local paths are accepted as post-login targets.
///
/// Browsers read `\` as `/` and drop tabs and newlines, so a path holding
/// either could still name another host.
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if is_local_path(path) => path,
        _ => "/index",
    }
}

fn is_local_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains('\\')
        && !path.chars().any(char::is_control)
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/books");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn token_read_from_cookie() {
        let parts = parts(&[("cookie", "theme=dark; library_session=abc.def.ghi")]);
        assert_eq!(session_token(&parts).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn bearer_header_wins() {
        let parts = parts(&[
            ("authorization", "Bearer from-header"),
            ("cookie", "library_session=from-cookie"),
        ]);
        assert_eq!(session_token(&parts).as_deref(), Some("from-header"));
    }

    #[test]
    fn empty_cookie_is_no_session() {
        let parts = parts(&[("cookie", "library_session=")]);
        assert_eq!(session_token(&parts), None);
    }

    #[test]
    fn redirect_encodes_next() {
        let redirect = AuthRedirect {
            next: "/books?page=2".into(),
        };
        assert_eq!(redirect.location(), "/auth/login?next=%2Fbooks%3Fpage%3D2");
    }

    #[test]
    fn external_next_is_ignored() {
        assert_eq!(safe_next(Some("/books/3")), "/books/3");
        assert_eq!(safe_next(Some("//evil.example")), "/index");
        assert_eq!(safe_next(Some("https://evil.example")), "/index");
        assert_eq!(safe_next(Some("/\\evil.example")), "/index");
        assert_eq!(safe_next(Some("/books\\..\\evil")), "/index");
        assert_eq!(safe_next(Some("/\t/evil.example")), "/index");
        assert_eq!(safe_next(None), "/index");
    }
}
