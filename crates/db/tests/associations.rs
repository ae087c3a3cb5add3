//! Integration tests for tag, reference, and appearance junctions.

use library_core::resource::AliasPolicy;
use library_db::crud::{self, Deletion, Submission};
use library_db::models::book::{Book, BookForm};
use library_db::models::character::{Character, CharacterForm};
use library_db::models::person::{Actor, PersonForm};
use library_db::models::reference::{CreateReference, UpdateReference};
use library_db::models::series::{Series, SeriesForm};
use library_db::models::tag::{CreateTag, CreateTagType, Tag};
use library_db::repositories::{AppearanceRepo, ReferenceRepo, TagRepo};
use library_db::resource::Resource;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn saved<R: Resource + std::fmt::Debug>(pool: &PgPool, form: R::Form) -> R {
    match crud::add::<R>(pool, form).await.unwrap() {
        Submission::Saved(row) => row,
        other => panic!("expected a saved row, got {other:?}"),
    }
}

async fn new_book(pool: &PgPool, title: &str) -> Book {
    saved::<Book>(
        pool,
        BookForm {
            title: title.to_string(),
            ..Default::default()
        },
    )
    .await
}

async fn new_tag(pool: &PgPool, name: &str) -> Tag {
    let tag_type = TagRepo::create_type(
        pool,
        &CreateTagType {
            name: format!("{name} type"),
        },
    )
    .await
    .unwrap();
    TagRepo::create(
        pool,
        &CreateTag {
            tag_type_id: tag_type.id,
            name: name.to_string(),
        },
    )
    .await
    .unwrap()
}

async fn junction_rows(pool: &PgPool, table: &str) -> i64 {
    let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap();
    n
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_attach_tag_twice_is_idempotent(pool: PgPool) {
    let book = new_book(&pool, "Elantris").await;
    let tag = new_tag(&pool, "Standalone").await;

    assert!(TagRepo::attach::<Book>(&pool, book.id, tag.id).await.unwrap());
    assert!(!TagRepo::attach::<Book>(&pool, book.id, tag.id).await.unwrap());

    assert_eq!(junction_rows(&pool, "book_tags").await, 1);
    assert!(TagRepo::is_tagged::<Book>(&pool, book.id, tag.id).await.unwrap());

    let tags = TagRepo::tags_for::<Book>(&pool, book.id).await.unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].name, "Standalone");
    assert_eq!(tags[0].tag_type_name, "Standalone type");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_detach_unattached_tag_is_noop(pool: PgPool) {
    let book = new_book(&pool, "Elantris").await;
    let tag = new_tag(&pool, "Standalone").await;

    assert!(!TagRepo::detach::<Book>(&pool, book.id, tag.id).await.unwrap());
    assert_eq!(junction_rows(&pool, "book_tags").await, 0);

    TagRepo::attach::<Book>(&pool, book.id, tag.id).await.unwrap();
    assert!(TagRepo::detach::<Book>(&pool, book.id, tag.id).await.unwrap());
    assert!(!TagRepo::detach::<Book>(&pool, book.id, tag.id).await.unwrap());
    assert!(!TagRepo::is_tagged::<Book>(&pool, book.id, tag.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tag_junctions_are_per_resource(pool: PgPool) {
    let tag = new_tag(&pool, "Allomancy").await;
    let series = saved::<Series>(
        &pool,
        SeriesForm {
            universe_id: None,
            title: "Mistborn".into(),
        },
    )
    .await;
    let book = new_book(&pool, "The Final Empire").await;

    TagRepo::attach::<Series>(&pool, series.id, tag.id).await.unwrap();
    TagRepo::attach::<Book>(&pool, book.id, tag.id).await.unwrap();

    assert_eq!(TagRepo::tagged_with::<Series>(&pool, tag.id).await.unwrap(), vec![series.id]);
    assert_eq!(TagRepo::tagged_with::<Book>(&pool, tag.id).await.unwrap(), vec![book.id]);
    assert!(TagRepo::tagged_with::<Character>(&pool, tag.id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_owner_removes_tag_rows(pool: PgPool) {
    let book = new_book(&pool, "Elantris").await;
    let tag = new_tag(&pool, "Standalone").await;
    TagRepo::attach::<Book>(&pool, book.id, tag.id).await.unwrap();

    let result = crud::delete::<Book>(&pool, book.id, AliasPolicy::Restrict).await.unwrap();
    assert_eq!(result, Deletion::Deleted);
    assert_eq!(junction_rows(&pool, "book_tags").await, 0);
    assert!(TagRepo::find_by_id(&pool, tag.id).await.unwrap().is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_tag_removes_attachments(pool: PgPool) {
    let book = new_book(&pool, "Elantris").await;
    let tag = new_tag(&pool, "Standalone").await;
    TagRepo::attach::<Book>(&pool, book.id, tag.id).await.unwrap();

    assert!(TagRepo::delete(&pool, tag.id).await.unwrap());
    assert!(!TagRepo::delete(&pool, tag.id).await.unwrap());
    assert_eq!(junction_rows(&pool, "book_tags").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tag_name_unique_within_type(pool: PgPool) {
    let tag = new_tag(&pool, "Fantasy").await;
    let err = TagRepo::create(
        &pool,
        &CreateTag {
            tag_type_id: tag.tag_type_id,
            name: "Fantasy".into(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(
        library_db::constraint::unique_violation(&err),
        Some("uq_tags_tag_type_id_name")
    );

    let filtered = TagRepo::list(&pool, Some(tag.tag_type_id)).await.unwrap();
    assert_eq!(filtered.len(), 1);
    assert!(TagRepo::list(&pool, Some(tag.tag_type_id + 1000)).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// References
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reference_attach_detach(pool: PgPool) {
    let actor = saved::<Actor>(
        &pool,
        PersonForm {
            first_name: "Michael".into(),
            last_name: "Kramer".into(),
            ..Default::default()
        },
    )
    .await;
    let reference = ReferenceRepo::create(
        &pool,
        &CreateReference {
            key: "audible:B002UZMLXM".into(),
            is_private: None,
        },
    )
    .await
    .unwrap();
    assert!(!reference.is_private);

    assert!(ReferenceRepo::attach::<Actor>(&pool, actor.id, reference.id).await.unwrap());
    assert!(!ReferenceRepo::attach::<Actor>(&pool, actor.id, reference.id).await.unwrap());
    assert_eq!(junction_rows(&pool, "actor_refs").await, 1);

    let refs = ReferenceRepo::refs_for::<Actor>(&pool, actor.id).await.unwrap();
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0].key, "audible:B002UZMLXM");

    assert!(ReferenceRepo::detach::<Actor>(&pool, actor.id, reference.id).await.unwrap());
    assert!(!ReferenceRepo::detach::<Actor>(&pool, actor.id, reference.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reference_partial_update(pool: PgPool) {
    let reference = ReferenceRepo::create(
        &pool,
        &CreateReference {
            key: "isbn:9780765311788".into(),
            is_private: Some(false),
        },
    )
    .await
    .unwrap();

    let updated = ReferenceRepo::update(
        &pool,
        reference.id,
        &UpdateReference {
            key: None,
            is_private: Some(true),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.key, "isbn:9780765311788");
    assert!(updated.is_private);

    let missing = ReferenceRepo::update(
        &pool,
        reference.id + 1,
        &UpdateReference {
            key: Some("x".into()),
            is_private: None,
        },
    )
    .await
    .unwrap();
    assert!(missing.is_none());
}

// ---------------------------------------------------------------------------
// Appearances
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_appearances_link_books_and_characters(pool: PgPool) {
    let series = saved::<Series>(
        &pool,
        SeriesForm {
            universe_id: None,
            title: "Mistborn".into(),
        },
    )
    .await;
    let vin = saved::<Character>(
        &pool,
        CharacterForm {
            series_id: Some(series.id),
            first_name: "Vin".into(),
            ..Default::default()
        },
    )
    .await;
    let final_empire = new_book(&pool, "The Final Empire").await;
    let well = new_book(&pool, "The Well of Ascension").await;

    assert!(AppearanceRepo::attach(&pool, final_empire.id, vin.id).await.unwrap());
    assert!(!AppearanceRepo::attach(&pool, final_empire.id, vin.id).await.unwrap());
    assert!(AppearanceRepo::attach(&pool, well.id, vin.id).await.unwrap());

    let books = AppearanceRepo::books_for_character(&pool, vin.id).await.unwrap();
    let titles: Vec<&str> = books.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, ["The Final Empire", "The Well of Ascension"]);

    let characters = AppearanceRepo::characters_in_book(&pool, final_empire.id)
        .await
        .unwrap();
    assert_eq!(characters.len(), 1);
    assert_eq!(characters[0].id, vin.id);
    assert_eq!(
        AppearanceRepo::character_ids(&pool, well.id).await.unwrap(),
        vec![vin.id]
    );

    assert!(AppearanceRepo::detach(&pool, well.id, vin.id).await.unwrap());
    assert!(!AppearanceRepo::detach(&pool, well.id, vin.id).await.unwrap());
    assert_eq!(junction_rows(&pool, "appearances").await, 1);
}
