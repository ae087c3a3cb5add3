//! Request extractors guarding the catalogue.
//!
//! - [`auth::AuthUser`] -- the logged-in user, from the session cookie or a
//!   Bearer token. Rejects with a redirect to the login page.

pub mod auth;
