//! Integration tests for character aliasing and the alias delete policy.
//!
//! Scenario: Universe "Cosmere" -> Series "Mistborn" -> Character "Vin" ->
//! alias "Valette" whose parent is Vin.

use assert_matches::assert_matches;
use library_core::resource::AliasPolicy;
use library_db::crud::{self, Deletion, Submission};
use library_db::models::character::{Character, CharacterForm};
use library_db::models::series::{Series, SeriesForm};
use library_db::models::universe::{Universe, UniverseForm};
use library_db::repositories::CharacterRepo;
use library_db::resource::Resource;
use sqlx::PgPool;

struct Cosmere {
    series: Series,
    vin: Character,
    valette: Character,
}

async fn saved<R: Resource + std::fmt::Debug>(pool: &PgPool, form: R::Form) -> R {
    match crud::add::<R>(pool, form).await.unwrap() {
        Submission::Saved(row) => row,
        other => panic!("expected a saved row, got {other:?}"),
    }
}

fn character(
    universe_id: i64,
    series_id: i64,
    first: &str,
    parent_id: Option<i64>,
) -> CharacterForm {
    CharacterForm {
        universe_id: Some(universe_id),
        series_id: Some(series_id),
        parent_id,
        first_name: first.to_string(),
        last_name: String::new(),
        ..Default::default()
    }
}

async fn setup(pool: &PgPool) -> Cosmere {
    let universe = saved::<Universe>(
        pool,
        UniverseForm {
            title: "Cosmere".into(),
        },
    )
    .await;
    let series = saved::<Series>(
        pool,
        SeriesForm {
            universe_id: Some(universe.id),
            title: "Mistborn".into(),
        },
    )
    .await;
    let vin = saved::<Character>(pool, character(universe.id, series.id, "Vin", None)).await;
    let valette = saved::<Character>(
        pool,
        character(universe.id, series.id, "Valette", Some(vin.id)),
    )
    .await;
    Cosmere {
        series,
        vin,
        valette,
    }
}

async fn character_count(pool: &PgPool) -> i64 {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM characters")
        .fetch_one(pool)
        .await
        .unwrap();
    n
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_series_lists_character_and_alias(pool: PgPool) {
    let world = setup(&pool).await;

    assert_eq!(world.vin.last_name, "");
    assert_eq!(world.valette.parent_id, Some(world.vin.id));

    let names: Vec<String> = CharacterRepo::list_by_series(&pool, world.series.id)
        .await
        .unwrap()
        .iter()
        .map(|c| c.first_name.clone())
        .collect();
    assert_eq!(names, ["Valette", "Vin"]);

    let aliases = CharacterRepo::aliases(&pool, world.vin.id).await.unwrap();
    assert_eq!(aliases.len(), 1);
    assert_eq!(aliases[0].id, world.valette.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_restrict_policy_blocks_delete(pool: PgPool) {
    let world = setup(&pool).await;

    let result = crud::delete::<Character>(&pool, world.vin.id, AliasPolicy::Restrict)
        .await
        .unwrap();
    assert_matches!(result, Deletion::Blocked(_));
    assert_eq!(character_count(&pool).await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cascade_policy_removes_aliases(pool: PgPool) {
    let world = setup(&pool).await;

    let result = crud::delete::<Character>(&pool, world.vin.id, AliasPolicy::Cascade)
        .await
        .unwrap();
    assert_eq!(result, Deletion::Deleted);
    assert_eq!(character_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cascade_policy_handles_nested_aliases(pool: PgPool) {
    let world = setup(&pool).await;
    let nested = saved::<Character>(
        &pool,
        character(
            world.vin.universe_id.unwrap(),
            world.series.id,
            "Lady Valette Renoux",
            Some(world.valette.id),
        ),
    )
    .await;

    let mut conn = pool.acquire().await.unwrap();
    let subtree = CharacterRepo::alias_subtree(&mut conn, world.vin.id).await.unwrap();
    assert_eq!(subtree, vec![nested.id, world.valette.id]);
    drop(conn);

    let result = crud::delete::<Character>(&pool, world.vin.id, AliasPolicy::Cascade)
        .await
        .unwrap();
    assert_eq!(result, Deletion::Deleted);
    assert_eq!(character_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_alias_alone_is_allowed(pool: PgPool) {
    let world = setup(&pool).await;

    let result = crud::delete::<Character>(&pool, world.valette.id, AliasPolicy::Restrict)
        .await
        .unwrap();
    assert_eq!(result, Deletion::Deleted);
    assert_eq!(character_count(&pool).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_character_cannot_be_own_parent(pool: PgPool) {
    let world = setup(&pool).await;
    let mut form = world.vin.to_form();
    form.parent_id = Some(world.vin.id);

    let result = crud::edit::<Character>(&pool, world.vin.id, form).await.unwrap();
    assert_matches!(result, Some(Submission::Invalid(errors)) => {
        assert!(errors.contains("parent_id"));
    });
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_alias_cycle_is_rejected(pool: PgPool) {
    let world = setup(&pool).await;
    let mut form = world.vin.to_form();
    form.parent_id = Some(world.valette.id);

    let result = crud::edit::<Character>(&pool, world.vin.id, form).await.unwrap();
    assert_matches!(result, Some(Submission::Invalid(errors)) => {
        assert_eq!(
            errors.get("parent_id"),
            ["A character cannot be an alias of one of its own aliases.".to_string()]
        );
    });

    let vin = crud::get::<Character>(&pool, world.vin.id).await.unwrap().unwrap();
    assert_eq!(vin.parent_id, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_reparenting_never_commits_a_cycle(pool: PgPool) {
    let world = setup(&pool).await;
    let universe_id = world.vin.universe_id.unwrap();
    let kelsier =
        saved::<Character>(&pool, character(universe_id, world.series.id, "Kelsier", None)).await;

    let mut vin_form = world.vin.to_form();
    vin_form.parent_id = Some(kelsier.id);
    let mut kelsier_form = kelsier.to_form();
    kelsier_form.parent_id = Some(world.vin.id);

    let (vin_result, kelsier_result) = tokio::join!(
        crud::edit::<Character>(&pool, world.vin.id, vin_form),
        crud::edit::<Character>(&pool, kelsier.id, kelsier_form),
    );
    let saved_count = [vin_result, kelsier_result]
        .into_iter()
        .filter(|r| matches!(r, Ok(Some(Submission::Saved(_)))))
        .count();
    assert!(saved_count <= 1);

    let vin = crud::get::<Character>(&pool, world.vin.id).await.unwrap().unwrap();
    let kelsier = crud::get::<Character>(&pool, kelsier.id).await.unwrap().unwrap();
    assert!(!(vin.parent_id == Some(kelsier.id) && kelsier.parent_id == Some(vin.id)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_alias_subtree_ends_on_a_cycle(pool: PgPool) {
    let world = setup(&pool).await;
    sqlx::query("UPDATE characters SET parent_id = $1 WHERE id = $2")
        .bind(world.valette.id)
        .bind(world.vin.id)
        .execute(&pool)
        .await
        .unwrap();

    let mut conn = pool.acquire().await.unwrap();
    let subtree = CharacterRepo::alias_subtree(&mut conn, world.vin.id).await.unwrap();
    assert_eq!(subtree, [world.valette.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_parent_is_invalid(pool: PgPool) {
    let world = setup(&pool).await;
    let form = character(
        world.vin.universe_id.unwrap(),
        world.series.id,
        "Kelsier",
        Some(world.valette.id + 100),
    );

    let result = crud::add::<Character>(&pool, form).await.unwrap();
    assert_matches!(result, Submission::Invalid(errors) => {
        assert_eq!(errors.get("parent_id"), ["Selected character does not exist.".to_string()]);
    });
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_series_with_characters_cannot_be_deleted(pool: PgPool) {
    let world = setup(&pool).await;
    let result = crud::delete::<Series>(&pool, world.series.id, AliasPolicy::Cascade)
        .await
        .unwrap();
    assert_matches!(result, Deletion::Blocked(_));
}
