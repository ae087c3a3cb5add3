//! Route sets instantiated once per catalogue resource.

use axum::routing::{delete, get};
use axum::Router;
use library_db::repositories::{Referenceable, Taggable};

use crate::handlers::{references, resource, tags};
use crate::state::AppState;
use crate::views::tables::ResourceView;

/// HTML pages and delete for one resource, mounted at `/<slug>`.
pub fn resource_router<R: ResourceView>() -> Router<AppState> {
    let base = format!("/{}", R::KIND.slug());
    Router::new()
        .route(&base, get(resource::list::<R>))
        .route(
            &format!("{base}/add"),
            get(resource::add_form::<R>).post(resource::add::<R>),
        )
        .route(
            &format!("{base}/{{id}}"),
            get(resource::show::<R>).delete(resource::delete::<R>),
        )
        .route(
            &format!("{base}/{{id}}/edit"),
            get(resource::edit_form::<R>).post(resource::edit::<R>),
        )
}

/// `/<slug>/{id}/tags` for a taggable resource.
pub fn tag_router<T: Taggable>() -> Router<AppState> {
    let base = format!("/{}/{{id}}/tags", T::KIND.slug());
    Router::new()
        .route(&base, get(tags::list_for::<T>).post(tags::attach::<T>))
        .route(&format!("{base}/{{tag_id}}"), delete(tags::detach::<T>))
}

/// `/<slug>/{id}/refs` for a referenceable resource.
pub fn ref_router<T: Referenceable>() -> Router<AppState> {
    let base = format!("/{}/{{id}}/refs", T::KIND.slug());
    Router::new()
        .route(
            &base,
            get(references::list_for::<T>).post(references::attach::<T>),
        )
        .route(
            &format!("{base}/{{ref_id}}"),
            delete(references::detach::<T>),
        )
}
