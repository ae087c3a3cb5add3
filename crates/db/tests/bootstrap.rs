use sqlx::PgPool;

/// Connect, migrate, and verify every catalogue table exists and starts empty.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    library_db::health_check(&pool).await.unwrap();

    let tables = [
        "users",
        "universes",
        "series",
        "authors",
        "actors",
        "art",
        "books",
        "characters",
        "tag_types",
        "tags",
        "refs",
        "appearances",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// Running migrations a second time is a no-op.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_migrations_are_idempotent(pool: PgPool) {
    library_db::run_migrations(&pool).await.unwrap();
}
