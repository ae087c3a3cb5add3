//! Repository layer.
//!
//! Catalogue entities implement [`Resource`](crate::resource::Resource) here
//! and take `&mut PgConnection` so they compose inside one transaction.
//! Auxiliary repositories (tags, references, users) are zero-sized structs
//! whose methods accept `&PgPool` as the first argument.

pub mod actor_repo;
pub mod appearance_repo;
pub mod art_repo;
pub mod association_repo;
pub mod author_repo;
pub mod book_repo;
pub mod catalog_repo;
pub mod character_repo;
pub mod choice_repo;
pub mod reference_repo;
pub mod series_repo;
pub mod tag_repo;
pub mod universe_repo;
pub mod user_repo;

mod person;

pub use appearance_repo::AppearanceRepo;
pub use association_repo::{Junction, Referenceable, Taggable};
pub use catalog_repo::CatalogRepo;
pub use character_repo::CharacterRepo;
pub use choice_repo::ChoiceRepo;
pub use reference_repo::ReferenceRepo;
pub use series_repo::SeriesRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
