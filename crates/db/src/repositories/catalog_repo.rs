//! Summary queries for the home page.

use library_core::resource::ResourceKind;
use sqlx::PgPool;

use crate::models::catalog::KindCount;

/// Cross-table counts.
pub struct CatalogRepo;

impl CatalogRepo {
    /// Row count for every resource kind, in navigation order.
    pub async fn counts(pool: &PgPool) -> Result<Vec<KindCount>, sqlx::Error> {
        let mut counts = Vec::with_capacity(ResourceKind::ALL.len());
        for kind in ResourceKind::ALL {
            let query = format!("SELECT COUNT(*) FROM {}", kind.table());
            let count = sqlx::query_scalar::<_, i64>(&query).fetch_one(pool).await?;
            counts.push(KindCount { kind, count });
        }
        Ok(counts)
    }
}
