#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use library_core::resource::AliasPolicy;
use library_db::models::user::{CreateUser, User};
use library_db::repositories::UserRepo;
use library_storage::{InMemoryObjectStore, ObjectStore};
use sqlx::PgPool;
use tower::ServiceExt;

use library_api::auth::jwt::{generate_session_token, JwtConfig};
use library_api::auth::password::hash_password;
use library_api::config::ServerConfig;
use library_api::middleware::auth::SESSION_COOKIE;
use library_api::router::build_app_router;
use library_api::state::AppState;

/// Password of every user created by [`create_user`].
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults and uploads disabled.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        alias_policy: AliasPolicy::Restrict,
        jwt: JwtConfig {
            secret: "test-secret-key-for-integration-tests".to_string(),
            session_expiry_mins: 60,
        },
        storage: None,
    }
}

/// Build the full application router, the same way `main.rs` does.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app(pool, test_config(), None)
}

/// Same as [`build_test_app`] with an in-memory object store.
pub fn build_test_app_with_storage(pool: PgPool, store: Arc<InMemoryObjectStore>) -> Router {
    let store: Arc<dyn ObjectStore> = store;
    build_app(pool, test_config(), Some(store))
}

/// Same as [`build_test_app`] with a different default alias policy.
pub fn build_test_app_with_policy(pool: PgPool, alias_policy: AliasPolicy) -> Router {
    let config = ServerConfig {
        alias_policy,
        ..test_config()
    };
    build_app(pool, config, None)
}

fn build_app(pool: PgPool, config: ServerConfig, storage: Option<Arc<dyn ObjectStore>>) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Users and sessions
// ---------------------------------------------------------------------------

/// Insert a user with [`TEST_PASSWORD`].
pub async fn create_user(pool: &PgPool, username: &str) -> User {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Create a user and return a session token for it.
pub async fn session_token(pool: &PgPool) -> String {
    let user = create_user(pool, "kelsier").await;
    generate_session_token(user.id, &user.username, &test_config().jwt)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    content_type: Option<&str>,
    body: Body,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(COOKIE, format!("{SESSION_COOKIE}={token}"));
    }
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None, Body::empty()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None, Body::empty()).await
}

/// POST an `application/x-www-form-urlencoded` body without a session.
pub async fn post_form(app: Router, uri: &str, body: &str) -> Response<Body> {
    send(
        app,
        Method::POST,
        uri,
        None,
        Some("application/x-www-form-urlencoded"),
        Body::from(body.to_string()),
    )
    .await
}

pub async fn post_form_auth(app: Router, uri: &str, body: &str, token: &str) -> Response<Body> {
    send(
        app,
        Method::POST,
        uri,
        Some(token),
        Some("application/x-www-form-urlencoded"),
        Body::from(body.to_string()),
    )
    .await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    json: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(
        app,
        Method::POST,
        uri,
        Some(token),
        Some("application/json"),
        Body::from(json.to_string()),
    )
    .await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    json: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(
        app,
        Method::PUT,
        uri,
        Some(token),
        Some("application/json"),
        Body::from(json.to_string()),
    )
    .await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None, Body::empty()).await
}

/// POST a single-file multipart body under the `file` field.
pub async fn post_file_auth(
    app: Router,
    uri: &str,
    file_name: &str,
    bytes: &[u8],
    token: &str,
) -> Response<Body> {
    let boundary = "library-test-boundary";
    let mut body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    send(
        app,
        Method::POST,
        uri,
        Some(token),
        Some(&format!("multipart/form-data; boundary={boundary}")),
        Body::from(body),
    )
    .await
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// The `Location` header of a redirect.
pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(LOCATION)
        .expect("response should carry a Location header")
        .to_str()
        .unwrap()
        .to_string()
}

/// Id at the end of a `/<slug>/{id}` redirect.
pub fn redirect_id(response: &Response<Body>) -> i64 {
    location(response)
        .rsplit('/')
        .next()
        .and_then(|id| id.parse().ok())
        .expect("redirect should end in an id")
}
