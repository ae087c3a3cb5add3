pub mod auth;
pub mod catalog;
pub mod health;

use axum::routing::{delete, get, post, put};
use axum::Router;
use library_db::models::art::Art;
use library_db::models::book::Book;
use library_db::models::character::Character;
use library_db::models::person::{Actor, Author};
use library_db::models::series::Series;
use library_db::models::universe::Universe;

use crate::handlers::{appearances, home, references, tags, uploads};
use crate::state::AppState;

use catalog::{ref_router, resource_router, tag_router};

/// Build the catalogue route tree. Every route here requires a session.
///
/// Route hierarchy:
///
/// ```text
/// /, /index                                         home page
///
/// /<slug>                                           list page
/// /<slug>/add                                       add form (GET, POST)
/// /<slug>/{id}                                      detail page, delete
/// /<slug>/{id}/edit                                 edit form (GET, POST)
///   <slug> = universes, series, books, authors, characters, actors, art
///
/// /<slug>/{id}/tags                                 list, attach
/// /<slug>/{id}/tags/{tag_id}                        detach
///   <slug> = actors, art, books, characters, series, universes
///
/// /<slug>/{id}/refs                                 list, attach
/// /<slug>/{id}/refs/{ref_id}                        detach
///   <slug> = actors, art, characters
///
/// /books/{id}/characters                            list, attach
/// /books/{id}/characters/{character_id}             detach
/// /characters/{id}/books                            books the character is in
/// /characters/{id}/aliases                          direct aliases
/// /series/{id}/characters                           characters in a series
///
/// /tag-types                                        list, create
/// /tags                                             list (?tag_type_id=), create
/// /tags/{id}                                        delete
/// /refs                                             list, create
/// /refs/{id}                                        update (PUT), delete
///
/// /uploads                                          upload (multipart)
/// /uploads/{key}                                    delete
/// ```
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/index", get(home::index))
        // Resource pages.
        .merge(resource_router::<Universe>())
        .merge(resource_router::<Series>())
        .merge(resource_router::<Book>())
        .merge(resource_router::<Author>())
        .merge(resource_router::<Character>())
        .merge(resource_router::<Actor>())
        .merge(resource_router::<Art>())
        // Tag attachments.
        .merge(tag_router::<Actor>())
        .merge(tag_router::<Art>())
        .merge(tag_router::<Book>())
        .merge(tag_router::<Character>())
        .merge(tag_router::<Series>())
        .merge(tag_router::<Universe>())
        // Reference attachments.
        .merge(ref_router::<Actor>())
        .merge(ref_router::<Art>())
        .merge(ref_router::<Character>())
        // Book/character graph.
        .route(
            "/books/{id}/characters",
            get(appearances::characters_in_book).post(appearances::attach_character),
        )
        .route(
            "/books/{id}/characters/{character_id}",
            delete(appearances::detach_character),
        )
        .route(
            "/characters/{id}/books",
            get(appearances::books_for_character),
        )
        .route("/characters/{id}/aliases", get(appearances::aliases))
        .route(
            "/series/{id}/characters",
            get(appearances::characters_in_series),
        )
        // Tags and references.
        .route("/tag-types", get(tags::list_types).post(tags::create_type))
        .route("/tags", get(tags::list_tags).post(tags::create_tag))
        .route("/tags/{id}", delete(tags::delete_tag))
        .route("/refs", get(references::list).post(references::create))
        .route(
            "/refs/{id}",
            put(references::update).delete(references::delete),
        )
        // Uploads.
        .route("/uploads", post(uploads::upload))
        .route("/uploads/{key}", delete(uploads::delete))
}
