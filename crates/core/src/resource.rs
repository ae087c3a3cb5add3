//! Catalogue resource kinds and the alias delete policy.
//!
//! Every browsable entity type is listed once here so routing, page titles,
//! and table names stay in one place.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;

/// One of the seven catalogue entity types served by the generic CRUD flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Actor,
    Art,
    Author,
    Book,
    Character,
    Series,
    Universe,
}

impl ResourceKind {
    /// All kinds in navigation order.
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Book,
        ResourceKind::Author,
        ResourceKind::Series,
        ResourceKind::Universe,
        ResourceKind::Character,
        ResourceKind::Actor,
        ResourceKind::Art,
    ];

    /// URL path segment, e.g. `/books`.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Actor => "actors",
            Self::Art => "art",
            Self::Author => "authors",
            Self::Book => "books",
            Self::Character => "characters",
            Self::Series => "series",
            Self::Universe => "universes",
        }
    }

    /// Database table holding rows of this kind.
    pub fn table(self) -> &'static str {
        // Table names happen to match the slugs.
        self.slug()
    }

    /// Singular human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Actor => "Actor",
            Self::Art => "Art",
            Self::Author => "Author",
            Self::Book => "Book",
            Self::Character => "Character",
            Self::Series => "Series",
            Self::Universe => "Universe",
        }
    }

    /// Plural human-readable label used for list pages.
    pub fn plural_label(self) -> &'static str {
        match self {
            Self::Actor => "Actors",
            Self::Art => "Art",
            Self::Author => "Authors",
            Self::Book => "Books",
            Self::Character => "Characters",
            Self::Series => "Series",
            Self::Universe => "Universes",
        }
    }

    /// Parse a URL slug back into a kind.
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.slug() == slug)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What deleting a character that still has aliases does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasPolicy {
    /// Refuse the delete while aliases exist.
    #[default]
    Restrict,
    /// Delete the whole alias subtree together with the character.
    Cascade,
}

impl AliasPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Restrict => "restrict",
            Self::Cascade => "cascade",
        }
    }
}

impl FromStr for AliasPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "restrict" => Ok(Self::Restrict),
            "cascade" => Ok(Self::Cascade),
            other => Err(CoreError::Validation(format!(
                "Unknown alias policy '{other}'. Must be one of: restrict, cascade"
            ))),
        }
    }
}
