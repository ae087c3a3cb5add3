//! Domain model structs and DTOs.
//!
//! Each catalogue submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` form DTO used for both add and edit
//!   (edits replace every mutable field)

pub mod appearance;
pub mod art;
pub mod book;
pub mod catalog;
pub mod character;
pub mod choice;
pub mod person;
pub mod reference;
pub mod series;
pub mod tag;
pub mod universe;
pub mod user;
