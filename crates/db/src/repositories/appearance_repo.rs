//! Repository for the `appearances` junction (books <-> characters).

use library_core::types::DbId;
use sqlx::PgPool;

use super::association_repo::{self, APPEARANCES};
use crate::models::book::Book;
use crate::models::character::Character;
use crate::resource::Resource;

/// Links characters to the books they appear in.
pub struct AppearanceRepo;

impl AppearanceRepo {
    /// Characters appearing in a book.
    pub async fn characters_in_book(
        pool: &PgPool,
        book_id: DbId,
    ) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!(
            "SELECT {columns} FROM characters
             WHERE id IN (SELECT character_id FROM appearances WHERE book_id = $1)
             ORDER BY {order}",
            columns = Character::COLUMNS,
            order = Character::ORDER_BY,
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(book_id)
            .fetch_all(pool)
            .await
    }

    /// Books a character appears in.
    pub async fn books_for_character(
        pool: &PgPool,
        character_id: DbId,
    ) -> Result<Vec<Book>, sqlx::Error> {
        let query = format!(
            "SELECT {columns} FROM books
             WHERE id IN (SELECT book_id FROM appearances WHERE character_id = $1)
             ORDER BY {order}",
            columns = Book::COLUMNS,
            order = Book::ORDER_BY,
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(character_id)
            .fetch_all(pool)
            .await
    }

    /// Character ids appearing in a book.
    pub async fn character_ids(pool: &PgPool, book_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        association_repo::members(&mut conn, APPEARANCES, book_id).await
    }

    /// Record that a character appears in a book. Returns `false` if it
    /// already was.
    pub async fn attach(
        pool: &PgPool,
        book_id: DbId,
        character_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let added = association_repo::attach(&mut tx, APPEARANCES, book_id, character_id).await?;
        tx.commit().await?;
        Ok(added)
    }

    /// Remove an appearance. Returns `false` if there was none.
    pub async fn detach(
        pool: &PgPool,
        book_id: DbId,
        character_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let removed = association_repo::detach(&mut tx, APPEARANCES, book_id, character_id).await?;
        tx.commit().await?;
        Ok(removed)
    }
}
