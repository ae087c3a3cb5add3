//! HTTP-level integration tests for tags, references, and appearances.

mod common;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{body_json, delete_auth, get_auth, post_form_auth, post_json_auth, put_json_auth, redirect_id};
use library_api::error::AppError;
use library_db::models::book::Book;
use library_db::repositories::TagRepo;
use serde_json::json;
use sqlx::PgPool;

async fn create_tag(app: &axum::Router, token: &str, type_name: &str, name: &str) -> (i64, i64) {
    let response = post_json_auth(app.clone(), "/tag-types", json!({ "name": type_name }), token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let type_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json_auth(
        app.clone(),
        "/tags",
        json!({ "tag_type_id": type_id, "name": name }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let tag_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    (type_id, tag_id)
}

async fn create_book(app: &axum::Router, token: &str, title: &str) -> i64 {
    let response = post_form_auth(app.clone(), "/books/add", &format!("title={title}"), token).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    redirect_id(&response)
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn attaching_a_tag_twice_keeps_one_row(pool: PgPool) {
    let token = common::session_token(&pool).await;
    let app = common::build_test_app(pool.clone());
    let (_, tag_id) = create_tag(&app, &token, "Genre", "Fantasy").await;
    let book_id = create_book(&app, &token, "Elantris").await;

    let uri = format!("/books/{book_id}/tags");
    for _ in 0..2 {
        let response = post_json_auth(app.clone(), &uri, json!({ "tag_id": tag_id }), &token).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["success"], true);
    }

    let response = get_auth(app, &uri, &token).await;
    let json = body_json(response).await;
    let tags = json["data"].as_array().unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0]["name"], "Fantasy");
    assert_eq!(tags[0]["tag_type_name"], "Genre");

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_tags")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn detach_reports_whether_tag_was_attached(pool: PgPool) {
    let token = common::session_token(&pool).await;
    let app = common::build_test_app(pool);
    let (_, tag_id) = create_tag(&app, &token, "Genre", "Fantasy").await;
    let book_id = create_book(&app, &token, "Elantris").await;
    let uri = format!("/books/{book_id}/tags/{tag_id}");

    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(body_json(response).await["success"], false);

    post_json_auth(
        app.clone(),
        &format!("/books/{book_id}/tags"),
        json!({ "tag_id": tag_id }),
        &token,
    )
    .await;

    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(body_json(response).await["success"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn tag_on_missing_owner_is_404(pool: PgPool) {
    let token = common::session_token(&pool).await;
    let app = common::build_test_app(pool);
    let (_, tag_id) = create_tag(&app, &token, "Genre", "Fantasy").await;

    let response =
        post_json_auth(app, "/universes/8080/tags", json!({ "tag_id": tag_id }), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn tags_filter_by_type(pool: PgPool) {
    let token = common::session_token(&pool).await;
    let app = common::build_test_app(pool);
    let (genre_id, _) = create_tag(&app, &token, "Genre", "Fantasy").await;
    create_tag(&app, &token, "Format", "Hardcover").await;

    let response = get_auth(app.clone(), "/tags", &token).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);

    let response = get_auth(app, &format!("/tags?tag_type_id={genre_id}"), &token).await;
    let json = body_json(response).await;
    let tags = json["data"].as_array().unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0]["name"], "Fantasy");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_tag_type_is_409(pool: PgPool) {
    let token = common::session_token(&pool).await;
    let app = common::build_test_app(pool);
    create_tag(&app, &token, "Genre", "Fantasy").await;

    let response = post_json_auth(app, "/tag-types", json!({ "name": " Genre " }), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "Tag type 'Genre' already exists.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_tag_in_same_type_is_409(pool: PgPool) {
    let token = common::session_token(&pool).await;
    let app = common::build_test_app(pool);
    let (type_id, _) = create_tag(&app, &token, "Genre", "Fantasy").await;

    let body = json!({ "tag_type_id": type_id, "name": "Fantasy" });
    let response = post_json_auth(app, "/tags", body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "Tag 'Fantasy' already exists for this type.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn owner_vanishing_before_attach_is_404(pool: PgPool) {
    let token = common::session_token(&pool).await;
    let app = common::build_test_app(pool.clone());
    let (_, tag_id) = create_tag(&app, &token, "Genre", "Fantasy").await;

    // The insert a handler runs after its existence check, with the owner gone.
    let err = TagRepo::attach::<Book>(&pool, 424242, tag_id).await.unwrap_err();
    let response = AppError::missing_on_foreign_key(err, "Book", 424242).into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Book with id 424242 not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_tag_type_name_is_422(pool: PgPool) {
    let token = common::session_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(app, "/tag-types", json!({ "name": "" }), &token).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleted_tag_disappears_from_owners(pool: PgPool) {
    let token = common::session_token(&pool).await;
    let app = common::build_test_app(pool);
    let (_, tag_id) = create_tag(&app, &token, "Genre", "Fantasy").await;
    let book_id = create_book(&app, &token, "Elantris").await;
    post_json_auth(
        app.clone(),
        &format!("/books/{book_id}/tags"),
        json!({ "tag_id": tag_id }),
        &token,
    )
    .await;

    let response = delete_auth(app.clone(), &format!("/tags/{tag_id}"), &token).await;
    assert_eq!(body_json(response).await["success"], true);

    let response = get_auth(app, &format!("/books/{book_id}/tags"), &token).await;
    assert!(body_json(response).await["data"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// References
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn references_can_be_created_updated_and_attached(pool: PgPool) {
    let token = common::session_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(app.clone(), "/refs", json!({ "key": "isbn:9780765311788" }), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let ref_id = json["data"]["id"].as_i64().unwrap();
    assert_eq!(json["data"]["is_private"], false);

    let response = put_json_auth(
        app.clone(),
        &format!("/refs/{ref_id}"),
        json!({ "is_private": true }),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_private"], true);
    assert_eq!(json["data"]["key"], "isbn:9780765311788");

    let response =
        post_form_auth(app.clone(), "/actors/add", "first_name=Michael&last_name=Kramer", &token).await;
    let actor_id = redirect_id(&response);

    let uri = format!("/actors/{actor_id}/refs");
    let response = post_json_auth(app.clone(), &uri, json!({ "ref_id": ref_id }), &token).await;
    assert_eq!(body_json(response).await["success"], true);

    let response = get_auth(app.clone(), &uri, &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["id"], ref_id);

    let response = delete_auth(app, &format!("{uri}/{ref_id}"), &token).await;
    assert_eq!(body_json(response).await["success"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn updating_missing_reference_is_404(pool: PgPool) {
    let token = common::session_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = put_json_auth(app, "/refs/777", json!({ "key": "x" }), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Appearances
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn character_appears_in_book_once(pool: PgPool) {
    let token = common::session_token(&pool).await;
    let app = common::build_test_app(pool);
    let book_id = create_book(&app, &token, "Mistborn").await;

    let response = post_form_auth(app.clone(), "/series/add", "title=Mistborn+Era+One", &token).await;
    let series_id = redirect_id(&response);
    let response = post_form_auth(
        app.clone(),
        "/characters/add",
        &format!("series_id={series_id}&first_name=Vin"),
        &token,
    )
    .await;
    let vin_id = redirect_id(&response);

    let uri = format!("/books/{book_id}/characters");
    for _ in 0..2 {
        let response =
            post_json_auth(app.clone(), &uri, json!({ "character_id": vin_id }), &token).await;
        assert_eq!(body_json(response).await["success"], true);
    }

    let response = get_auth(app.clone(), &uri, &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["first_name"], "Vin");

    let response = get_auth(app.clone(), &format!("/characters/{vin_id}/books"), &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["id"], book_id);

    let response = delete_auth(app.clone(), &format!("{uri}/{vin_id}"), &token).await;
    assert_eq!(body_json(response).await["success"], true);

    let response = get_auth(app, &uri, &token).await;
    assert!(body_json(response).await["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn appearance_of_missing_character_is_404(pool: PgPool) {
    let token = common::session_token(&pool).await;
    let app = common::build_test_app(pool);
    let book_id = create_book(&app, &token, "Mistborn").await;

    let response = post_json_auth(
        app,
        &format!("/books/{book_id}/characters"),
        json!({ "character_id": 5150 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
