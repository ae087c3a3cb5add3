use axum::routing::get;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Public login, registration, and logout pages.
///
/// ```text
/// GET, POST  /login
/// GET, POST  /register
/// GET, POST  /logout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/logout", get(auth::logout).post(auth::logout))
}
