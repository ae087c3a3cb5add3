//! Domain types shared by every library crate.
//!
//! Nothing in here touches the database or HTTP: error taxonomy, id and
//! timestamp aliases, the catalogue resource kinds, name formatting, and the
//! form normalization / field-error helpers used by the validation layer.

pub mod error;
pub mod naming;
pub mod resource;
pub mod types;
pub mod validation;
