//! Request handlers.
//!
//! [`resource`] serves the HTML pages of all seven catalogue resources
//! through one generic set of functions. The association modules answer
//! JSON. Every handler except those in [`auth`] takes an
//! [`AuthUser`](crate::middleware::auth::AuthUser).

pub mod appearances;
pub mod auth;
pub mod home;
pub mod references;
pub mod resource;
pub mod tags;
pub mod uploads;

use library_core::types::DbId;
use library_db::crud;
use library_db::resource::Resource;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// 404 unless row `id` of `R` exists.
async fn ensure_exists<R: Resource>(state: &AppState, id: DbId) -> AppResult<()> {
    crud::get::<R>(&state.pool, id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::not_found(R::KIND.label(), id))
}
