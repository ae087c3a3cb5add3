//! Handlers for the `/auth` pages (login, register, logout).
//!
//! These are the only HTML pages reachable without a session.

use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::{AppendHeaders, Html, IntoResponse, Redirect, Response};
use axum::Form;
use library_core::validation::{
    normalize_and_validate, normalize_optional, trim_in_place, FieldErrors, Normalize,
};
use library_db::constraint;
use library_db::models::user::CreateUser;
use library_db::repositories::UserRepo;
use serde::Deserialize;
use validator::Validate;

use crate::auth::jwt::generate_session_token;
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{clear_session_cookie, safe_next, session_cookie};
use crate::state::AppState;
use crate::views::forms::{render_form, Field, FORM_ERROR};
use crate::views::layout;

const INVALID_LOGIN: &str = "Invalid username or password.";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query string of `GET /auth/login`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
    /// Set after a successful registration.
    pub registered: Option<bool>,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "This field is required."))]
    pub username: String,
    #[validate(length(min = 1, message = "This field is required."))]
    pub password: String,
    pub next: Option<String>,
}

impl Normalize for LoginForm {
    fn normalize(&mut self) {
        trim_in_place(&mut self.username);
        normalize_optional(&mut self.next);
    }
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterForm {
    #[validate(length(min = 1, max = 64, message = "Username must be 1 to 64 characters."))]
    pub username: String,
    #[validate(email(message = "Invalid email address."))]
    pub email: String,
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords must match."))]
    pub password_confirm: String,
}

impl Normalize for RegisterForm {
    fn normalize(&mut self) {
        trim_in_place(&mut self.username);
        trim_in_place(&mut self.email);
        self.email = self.email.to_lowercase();
    }
}

// ---------------------------------------------------------------------------
// Login / logout
// ---------------------------------------------------------------------------

/// GET /auth/login
pub async fn login_form(Query(query): Query<LoginQuery>) -> Html<String> {
    let form = LoginForm {
        next: query.next,
        ..Default::default()
    };
    let notice = if query.registered.unwrap_or(false) {
        Some("Congratulations, you are now a registered user!")
    } else {
        None
    };
    Html(login_page(&form, &FieldErrors::new(), notice))
}

/// POST /auth/login
///
/// On success sets the session cookie and redirects (303) to `next`.
pub async fn login(
    State(state): State<AppState>,
    Form(mut form): Form<LoginForm>,
) -> AppResult<Response> {
    if let Err(errors) = normalize_and_validate(&mut form) {
        return Ok(rejected_login(&form, &errors, StatusCode::UNPROCESSABLE_ENTITY));
    }

    let user = match UserRepo::find_by_username(&state.pool, &form.username).await? {
        Some(user) => user,
        None => return Ok(invalid_login(&form)),
    };

    let password_valid = verify_password(&form.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(username = %form.username, "Failed login attempt");
        return Ok(invalid_login(&form));
    }

    let token = generate_session_token(user.id, &user.username, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    let target = safe_next(form.next.as_deref()).to_string();
    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(&token, &state.config.jwt))]),
        Redirect::to(&target),
    )
        .into_response())
}

/// GET|POST /auth/logout
pub async fn logout() -> Response {
    (
        AppendHeaders([(SET_COOKIE, clear_session_cookie())]),
        Redirect::to("/auth/login"),
    )
        .into_response()
}

fn invalid_login(form: &LoginForm) -> Response {
    let mut errors = FieldErrors::new();
    errors.add(FORM_ERROR, INVALID_LOGIN);
    rejected_login(form, &errors, StatusCode::UNAUTHORIZED)
}

fn rejected_login(form: &LoginForm, errors: &FieldErrors, status: StatusCode) -> Response {
    (status, Html(login_page(form, errors, None))).into_response()
}

fn login_page(form: &LoginForm, errors: &FieldErrors, notice: Option<&str>) -> String {
    let fields = [
        Field::text("username", "Username", &form.username),
        Field::password("password", "Password"),
        Field::hidden("next", form.next.as_deref().unwrap_or_default()),
    ];
    let mut body = notice.map(layout::flash).unwrap_or_default();
    body.push_str(&render_form("/auth/login", &fields, errors, "Sign In"));
    body.push_str(r#"<p>New user? <a href="/auth/register">Click to register!</a></p>"#);
    layout::page("Sign In", None, &body)
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// GET /auth/register
pub async fn register_form() -> Html<String> {
    Html(register_page(&RegisterForm::default(), &FieldErrors::new()))
}

/// POST /auth/register
///
/// Creates the user and redirects (303) to the login page.
pub async fn register(
    State(state): State<AppState>,
    Form(mut form): Form<RegisterForm>,
) -> AppResult<Response> {
    let mut errors = match normalize_and_validate(&mut form) {
        Ok(()) => FieldErrors::new(),
        Err(errors) => errors,
    };
    if let Err(message) = validate_password_strength(&form.password, MIN_PASSWORD_LENGTH) {
        errors.add("password", message);
    }

    if !form.username.is_empty()
        && UserRepo::find_by_username(&state.pool, &form.username)
            .await?
            .is_some()
    {
        errors.add("username", "Please use a different username.");
    }
    if !form.email.is_empty()
        && UserRepo::find_by_email(&state.pool, &form.email)
            .await?
            .is_some()
    {
        errors.add("email", "Please use a different email address.");
    }

    if !errors.is_empty() {
        return Ok(rejected_registration(&form, &errors, StatusCode::UNPROCESSABLE_ENTITY));
    }

    let password_hash = hash_password(&form.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;
    let input = CreateUser {
        username: form.username.clone(),
        email: form.email.clone(),
        password_hash,
    };

    match UserRepo::create(&state.pool, &input).await {
        Ok(user) => {
            tracing::info!(user_id = user.id, "User registered");
            Ok(Redirect::to("/auth/login?registered=true").into_response())
        }
        Err(err) => match constraint::unique_violation(&err) {
            // Lost a race with a concurrent registration.
            Some(name) => {
                let field = if name.contains("email") { "email" } else { "username" };
                tracing::warn!(constraint = name, "Duplicate registration");
                let mut errors = FieldErrors::new();
                errors.add(field, format!("Please use a different {field}."));
                Ok(rejected_registration(&form, &errors, StatusCode::CONFLICT))
            }
            None => Err(err.into()),
        },
    }
}

fn rejected_registration(form: &RegisterForm, errors: &FieldErrors, status: StatusCode) -> Response {
    (status, Html(register_page(form, errors))).into_response()
}

fn register_page(form: &RegisterForm, errors: &FieldErrors) -> String {
    let fields = [
        Field::text("username", "Username", &form.username),
        Field::email("email", "Email", &form.email),
        Field::password("password", "Password"),
        Field::password("password_confirm", "Repeat Password"),
    ];
    let body = render_form("/auth/register", &fields, errors, "Register");
    layout::page("Register", None, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_form(email: &str, password: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            username: "kelsier".into(),
            email: email.into(),
            password: password.into(),
            password_confirm: confirm.into(),
        }
    }

    #[test]
    fn email_is_normalized() {
        let mut form = register_form("  Kelsier@Example.COM ", "longenough", "longenough");
        normalize_and_validate(&mut form).unwrap();
        assert_eq!(form.email, "kelsier@example.com");
    }

    #[test]
    fn bad_email_is_rejected() {
        let mut form = register_form("not-an-email", "longenough", "longenough");
        let errors = normalize_and_validate(&mut form).unwrap_err();
        assert_eq!(errors.get("email"), ["Invalid email address.".to_string()]);
    }

    #[test]
    fn password_confirmation_must_match() {
        let mut form = register_form("k@example.com", "longenough", "different");
        let errors = normalize_and_validate(&mut form).unwrap_err();
        assert!(errors.contains("password_confirm"));
    }

    #[test]
    fn login_page_keeps_next() {
        let form = LoginForm {
            next: Some("/books/3".into()),
            ..Default::default()
        };
        let html = login_page(&form, &FieldErrors::new(), None);
        assert!(html.contains(r#"name="next" value="/books/3""#));
    }
}
