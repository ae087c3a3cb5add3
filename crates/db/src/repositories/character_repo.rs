//! Store operations for the `characters` table, including alias lookups.
//!
//! Aliases point at their parent through `parent_id`. The foreign key is
//! `ON DELETE RESTRICT`, so a character with aliases can only be removed by
//! deleting its alias subtree first ([`AliasPolicy::Cascade`]).

use library_core::resource::{AliasPolicy, ResourceKind};
use library_core::types::DbId;
use library_core::validation::FieldErrors;
use sqlx::{PgConnection, PgPool};

use crate::models::character::{Character, CharacterForm};
use crate::resource::{check_link, delete_row, Resource};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, universe_id, series_id, parent_id, first_name, last_name, suffix, \
                       description, created_at, updated_at";

const ORDER_BY: &str = "last_name ASC, first_name ASC";

/// Alias and series lookups for characters.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Direct aliases of a character.
    pub async fn aliases(
        pool: &PgPool,
        character_id: DbId,
    ) -> Result<Vec<Character>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM characters WHERE parent_id = $1 ORDER BY {ORDER_BY}");
        sqlx::query_as::<_, Character>(&query)
            .bind(character_id)
            .fetch_all(pool)
            .await
    }

    /// All characters in a series, aliases included.
    pub async fn list_by_series(
        pool: &PgPool,
        series_id: DbId,
    ) -> Result<Vec<Character>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM characters WHERE series_id = $1 ORDER BY {ORDER_BY}");
        sqlx::query_as::<_, Character>(&query)
            .bind(series_id)
            .fetch_all(pool)
            .await
    }

    /// Ids of every alias below `character_id`, deepest first.
    ///
    /// Deleting in this order never trips the `parent_id` restriction. The
    /// walk stops at ids already on its path, so it ends even on a cycle.
    pub async fn alias_subtree(
        conn: &mut PgConnection,
        character_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "WITH RECURSIVE subtree AS (
                 SELECT id, 1 AS depth, ARRAY[$1::BIGINT, id] AS path
                 FROM characters WHERE parent_id = $1
                 UNION ALL
                 SELECT c.id, s.depth + 1, s.path || c.id
                 FROM characters c
                 JOIN subtree s ON c.parent_id = s.id
                 WHERE c.id <> ALL(s.path)
             )
             SELECT id FROM subtree ORDER BY depth DESC, id ASC",
        )
        .bind(character_id)
        .fetch_all(&mut *conn)
        .await
    }
}

impl Resource for Character {
    type Form = CharacterForm;

    const KIND: ResourceKind = ResourceKind::Character;
    const COLUMNS: &'static str = COLUMNS;
    const ORDER_BY: &'static str = ORDER_BY;
    const UNIQUE_FIELD: &'static str = "first_name";

    fn id(&self) -> DbId {
        self.id
    }

    fn display_name(&self) -> String {
        self.full_name()
    }

    fn to_form(&self) -> CharacterForm {
        CharacterForm::from(self)
    }

    fn duplicate_message(form: &CharacterForm) -> String {
        let name = library_core::naming::full_name(&form.first_name, None, &form.last_name, None);
        format!("A character named \"{name}\" already exists in this series.")
    }

    async fn find_duplicate(
        conn: &mut PgConnection,
        form: &CharacterForm,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                 SELECT 1 FROM characters
                 WHERE series_id = $1 AND first_name = $2 AND last_name = $3
                   AND ($4::BIGINT IS NULL OR id <> $4)
             )",
        )
        .bind(form.series_id)
        .bind(&form.first_name)
        .bind(&form.last_name)
        .bind(exclude_id)
        .fetch_one(&mut *conn)
        .await
    }

    async fn check_links(
        conn: &mut PgConnection,
        form: &CharacterForm,
        id: Option<DbId>,
    ) -> Result<FieldErrors, sqlx::Error> {
        let mut errors = FieldErrors::new();
        check_link(conn, &mut errors, "universe_id", ResourceKind::Universe, form.universe_id)
            .await?;
        check_link(conn, &mut errors, "series_id", ResourceKind::Series, form.series_id).await?;

        let Some(parent_id) = form.parent_id else {
            return Ok(errors);
        };
        if Some(parent_id) == id {
            errors.add("parent_id", "A character cannot be an alias of itself.");
            return Ok(errors);
        }
        check_link(conn, &mut errors, "parent_id", ResourceKind::Character, Some(parent_id))
            .await?;
        if let Some(id) = id {
            // The edited row is already locked; locking the new parent too
            // makes two edits that re-parent each other run one at a time.
            sqlx::query("SELECT id FROM characters WHERE id = $1 FOR UPDATE")
                .bind(parent_id)
                .execute(&mut *conn)
                .await?;
            let subtree = CharacterRepo::alias_subtree(conn, id).await?;
            if subtree.contains(&parent_id) {
                errors.add(
                    "parent_id",
                    "A character cannot be an alias of one of its own aliases.",
                );
            }
        }
        Ok(errors)
    }

    async fn insert(
        conn: &mut PgConnection,
        form: &CharacterForm,
    ) -> Result<Character, sqlx::Error> {
        let query = format!(
            "INSERT INTO characters
                (universe_id, series_id, parent_id, first_name, last_name, suffix, description)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(form.universe_id)
            .bind(form.series_id)
            .bind(form.parent_id)
            .bind(&form.first_name)
            .bind(&form.last_name)
            .bind(&form.suffix)
            .bind(&form.description)
            .fetch_one(&mut *conn)
            .await
    }

    async fn update(
        conn: &mut PgConnection,
        id: DbId,
        form: &CharacterForm,
    ) -> Result<Character, sqlx::Error> {
        let query = format!(
            "UPDATE characters SET
                universe_id = $2,
                series_id = $3,
                parent_id = $4,
                first_name = $5,
                last_name = $6,
                suffix = $7,
                description = $8
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .bind(form.universe_id)
            .bind(form.series_id)
            .bind(form.parent_id)
            .bind(&form.first_name)
            .bind(&form.last_name)
            .bind(&form.suffix)
            .bind(&form.description)
            .fetch_one(&mut *conn)
            .await
    }

    async fn delete(
        conn: &mut PgConnection,
        id: DbId,
        policy: AliasPolicy,
    ) -> Result<bool, sqlx::Error> {
        if policy == AliasPolicy::Cascade {
            let aliases = CharacterRepo::alias_subtree(conn, id).await?;
            for alias_id in &aliases {
                delete_row(conn, "characters", *alias_id).await?;
            }
            if !aliases.is_empty() {
                tracing::info!(character_id = id, aliases = aliases.len(), "Deleted alias subtree");
            }
        }
        delete_row(conn, "characters", id).await
    }
}
