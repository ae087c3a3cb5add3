//! The landing page.

use axum::extract::State;
use axum::response::Html;
use library_db::repositories::CatalogRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::views::{escape, layout};

/// GET / and GET /index
///
/// Entry counts per resource, each linking to its list page.
pub async fn index(user: AuthUser, State(state): State<AppState>) -> AppResult<Html<String>> {
    let counts = CatalogRepo::counts(&state.pool).await?;

    let items: String = counts
        .iter()
        .map(|c| {
            format!(
                r#"<li><a href="/{}">{}</a> ({})</li>"#,
                c.kind.slug(),
                escape(c.kind.plural_label()),
                c.count
            )
        })
        .collect::<Vec<_>>()
        .join("\n            ");

    let body = format!(
        r#"<p>Welcome back, {}.</p>
        <ul>
            {items}
        </ul>"#,
        escape(&user.username)
    );

    Ok(Html(layout::page("Home", Some(&user.username), &body)))
}
