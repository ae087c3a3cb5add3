//! Home page summary.

use library_core::resource::ResourceKind;
use serde::Serialize;

/// Number of rows of one resource kind.
#[derive(Debug, Clone, Serialize)]
pub struct KindCount {
    pub kind: ResourceKind,
    pub count: i64,
}
