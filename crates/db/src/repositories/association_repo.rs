//! Junction-table helpers shared by tags, references, and appearances.
//!
//! A [`Junction`] names a two-column association table. The free functions
//! here are written once over that descriptor; [`Taggable`] and
//! [`Referenceable`] bind each catalogue resource to its junction.

use library_core::types::DbId;
use sqlx::PgConnection;

use crate::models::art::Art;
use crate::models::book::Book;
use crate::models::character::Character;
use crate::models::person::Actor;
use crate::models::series::Series;
use crate::models::universe::Universe;
use crate::resource::Resource;

/// A junction table with an owner column and a member column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Junction {
    pub table: &'static str,
    pub owner_column: &'static str,
    pub member_column: &'static str,
}

impl Junction {
    pub const fn new(
        table: &'static str,
        owner_column: &'static str,
        member_column: &'static str,
    ) -> Self {
        Self {
            table,
            owner_column,
            member_column,
        }
    }
}

pub const ACTOR_TAGS: Junction = Junction::new("actor_tags", "actor_id", "tag_id");
pub const ART_TAGS: Junction = Junction::new("art_tags", "art_id", "tag_id");
pub const BOOK_TAGS: Junction = Junction::new("book_tags", "book_id", "tag_id");
pub const CHARACTER_TAGS: Junction = Junction::new("character_tags", "character_id", "tag_id");
pub const SERIES_TAGS: Junction = Junction::new("series_tags", "series_id", "tag_id");
pub const UNIVERSE_TAGS: Junction = Junction::new("universe_tags", "universe_id", "tag_id");

pub const ACTOR_REFS: Junction = Junction::new("actor_refs", "actor_id", "ref_id");
pub const ART_REFS: Junction = Junction::new("art_refs", "art_id", "ref_id");
pub const CHARACTER_REFS: Junction = Junction::new("character_refs", "character_id", "ref_id");

pub const APPEARANCES: Junction = Junction::new("appearances", "book_id", "character_id");

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// A resource that tags can be attached to.
pub trait Taggable: Resource {
    const TAGS: Junction;
}

/// A resource that references can be attached to.
pub trait Referenceable: Resource {
    const REFS: Junction;
}

impl Taggable for Actor {
    const TAGS: Junction = ACTOR_TAGS;
}

impl Taggable for Art {
    const TAGS: Junction = ART_TAGS;
}

impl Taggable for Book {
    const TAGS: Junction = BOOK_TAGS;
}

impl Taggable for Character {
    const TAGS: Junction = CHARACTER_TAGS;
}

impl Taggable for Series {
    const TAGS: Junction = SERIES_TAGS;
}

impl Taggable for Universe {
    const TAGS: Junction = UNIVERSE_TAGS;
}

impl Referenceable for Actor {
    const REFS: Junction = ACTOR_REFS;
}

impl Referenceable for Art {
    const REFS: Junction = ART_REFS;
}

impl Referenceable for Character {
    const REFS: Junction = CHARACTER_REFS;
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Whether `member` is attached to `owner`.
pub async fn is_attached(
    conn: &mut PgConnection,
    junction: Junction,
    owner: DbId,
    member: DbId,
) -> Result<bool, sqlx::Error> {
    let Junction {
        table,
        owner_column,
        member_column,
    } = junction;
    let query = format!(
        "SELECT EXISTS(SELECT 1 FROM {table} WHERE {owner_column} = $1 AND {member_column} = $2)"
    );
    sqlx::query_scalar::<_, bool>(&query)
        .bind(owner)
        .bind(member)
        .fetch_one(&mut *conn)
        .await
}

/// Attach `member` to `owner`. Returns `false` if it was already attached.
pub async fn attach(
    conn: &mut PgConnection,
    junction: Junction,
    owner: DbId,
    member: DbId,
) -> Result<bool, sqlx::Error> {
    if is_attached(conn, junction, owner, member).await? {
        return Ok(false);
    }
    let Junction {
        table,
        owner_column,
        member_column,
    } = junction;
    let query = format!(
        "INSERT INTO {table} ({owner_column}, {member_column}) VALUES ($1, $2)
         ON CONFLICT DO NOTHING"
    );
    let result = sqlx::query(&query)
        .bind(owner)
        .bind(member)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Detach `member` from `owner`. Returns `false` if it was not attached.
pub async fn detach(
    conn: &mut PgConnection,
    junction: Junction,
    owner: DbId,
    member: DbId,
) -> Result<bool, sqlx::Error> {
    let Junction {
        table,
        owner_column,
        member_column,
    } = junction;
    let query = format!("DELETE FROM {table} WHERE {owner_column} = $1 AND {member_column} = $2");
    let result = sqlx::query(&query)
        .bind(owner)
        .bind(member)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Member ids attached to `owner`, ascending.
pub async fn members(
    conn: &mut PgConnection,
    junction: Junction,
    owner: DbId,
) -> Result<Vec<DbId>, sqlx::Error> {
    let Junction {
        table,
        owner_column,
        member_column,
    } = junction;
    let query = format!(
        "SELECT {member_column} FROM {table} WHERE {owner_column} = $1 ORDER BY {member_column}"
    );
    sqlx::query_scalar::<_, DbId>(&query)
        .bind(owner)
        .fetch_all(&mut *conn)
        .await
}

/// Owner ids that `member` is attached to, ascending.
pub async fn owners(
    conn: &mut PgConnection,
    junction: Junction,
    member: DbId,
) -> Result<Vec<DbId>, sqlx::Error> {
    let Junction {
        table,
        owner_column,
        member_column,
    } = junction;
    let query = format!(
        "SELECT {owner_column} FROM {table} WHERE {member_column} = $1 ORDER BY {owner_column}"
    );
    sqlx::query_scalar::<_, DbId>(&query)
        .bind(member)
        .fetch_all(&mut *conn)
        .await
}
