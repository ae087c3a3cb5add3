//! Form layouts and table columns for each catalogue resource.

use library_core::resource::ResourceKind;
use library_db::models::art::{Art, ArtForm};
use library_db::models::book::{Book, BookForm};
use library_db::models::character::{Character, CharacterForm};
use library_db::models::choice::FormChoices;
use library_db::models::person::{Actor, Author, PersonForm};
use library_db::models::series::{Series, SeriesForm};
use library_db::models::universe::{Universe, UniverseForm};

use super::forms::{Field, FormView};
use super::tables::{Cell, ResourceView};

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

impl FormView for UniverseForm {
    fn fields<'a>(&self, _choices: &'a FormChoices) -> Vec<Field<'a>> {
        vec![Field::text("title", "Title", &self.title)]
    }
}

impl FormView for SeriesForm {
    const NEEDS_CHOICES: bool = true;

    fn fields<'a>(&self, choices: &'a FormChoices) -> Vec<Field<'a>> {
        vec![
            Field::select("universe_id", "Universe", &choices.universes, self.universe_id),
            Field::text("title", "Title", &self.title),
        ]
    }
}

impl FormView for BookForm {
    const NEEDS_CHOICES: bool = true;

    fn fields<'a>(&self, choices: &'a FormChoices) -> Vec<Field<'a>> {
        vec![
            Field::select("universe_id", "Universe", &choices.universes, self.universe_id),
            Field::select("series_id", "Series", &choices.series, self.series_id),
            Field::select("author_id", "Author", &choices.authors, self.author_id),
            Field::select("coauthor_id", "Co-Author", &choices.authors, self.coauthor_id),
            Field::text("title", "Title", &self.title),
            Field::number("series_index", "Series Number", self.series_index),
        ]
    }
}

impl FormView for PersonForm {
    fn fields<'a>(&self, _choices: &'a FormChoices) -> Vec<Field<'a>> {
        vec![
            Field::text("first_name", "First Name", &self.first_name),
            Field::optional_text("middle_name", "Middle Name", self.middle_name.as_deref()),
            Field::text("last_name", "Last Name", &self.last_name),
            Field::optional_text("suffix", "Suffix", self.suffix.as_deref()),
        ]
    }
}

impl FormView for CharacterForm {
    const NEEDS_CHOICES: bool = true;

    fn fields<'a>(&self, choices: &'a FormChoices) -> Vec<Field<'a>> {
        vec![
            Field::select("universe_id", "Universe", &choices.universes, self.universe_id),
            Field::select("series_id", "Series", &choices.series, self.series_id),
            Field::text("first_name", "First Name", &self.first_name),
            Field::text("last_name", "Last Name", &self.last_name),
            Field::optional_text("suffix", "Suffix", self.suffix.as_deref()),
            Field::select("parent_id", "Parent", &choices.characters, self.parent_id),
            Field::textarea("description", "Description", self.description.as_deref()),
        ]
    }
}

impl FormView for ArtForm {
    fn fields<'a>(&self, _choices: &'a FormChoices) -> Vec<Field<'a>> {
        vec![
            Field::text("artist", "Artist", &self.artist),
            Field::text("title", "Title", &self.title),
            Field::textarea("description", "Description", self.description.as_deref()),
            Field::text("source", "Source", &self.source),
        ]
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

impl ResourceView for Universe {
    const HEADINGS: &'static [&'static str] = &["Title"];

    fn cells(&self, _choices: &FormChoices) -> Vec<Cell> {
        vec![Cell::text(&self.title)]
    }

    fn details(&self, _choices: &FormChoices) -> Vec<(&'static str, Cell)> {
        vec![("Title", Cell::text(&self.title))]
    }
}

impl ResourceView for Series {
    const HEADINGS: &'static [&'static str] = &["Title", "Universe"];

    fn cells(&self, choices: &FormChoices) -> Vec<Cell> {
        vec![
            Cell::text(&self.title),
            Cell::link_to(ResourceKind::Universe, self.universe_id, &choices.universes),
        ]
    }

    fn details(&self, choices: &FormChoices) -> Vec<(&'static str, Cell)> {
        vec![
            ("Title", Cell::text(&self.title)),
            (
                "Universe",
                Cell::link_to(ResourceKind::Universe, self.universe_id, &choices.universes),
            ),
        ]
    }
}

impl ResourceView for Book {
    const HEADINGS: &'static [&'static str] = &["Title", "Author", "Series", "Number"];

    fn cells(&self, choices: &FormChoices) -> Vec<Cell> {
        vec![
            Cell::text(&self.title),
            Cell::link_to(ResourceKind::Author, self.author_id, &choices.authors),
            Cell::link_to(ResourceKind::Series, self.series_id, &choices.series),
            Cell::number(self.series_index),
        ]
    }

    fn details(&self, choices: &FormChoices) -> Vec<(&'static str, Cell)> {
        vec![
            ("Title", Cell::text(&self.title)),
            (
                "Author",
                Cell::link_to(ResourceKind::Author, self.author_id, &choices.authors),
            ),
            (
                "Co-Author",
                Cell::link_to(ResourceKind::Author, self.coauthor_id, &choices.authors),
            ),
            (
                "Universe",
                Cell::link_to(ResourceKind::Universe, self.universe_id, &choices.universes),
            ),
            (
                "Series",
                Cell::link_to(ResourceKind::Series, self.series_id, &choices.series),
            ),
            ("Series Number", Cell::number(self.series_index)),
        ]
    }
}

impl ResourceView for Author {
    const HEADINGS: &'static [&'static str] = &["Name"];

    fn cells(&self, _choices: &FormChoices) -> Vec<Cell> {
        vec![Cell::text(self.full_name())]
    }

    fn details(&self, _choices: &FormChoices) -> Vec<(&'static str, Cell)> {
        person_details(
            &self.first_name,
            self.middle_name.as_deref(),
            &self.last_name,
            self.suffix.as_deref(),
        )
    }
}

impl ResourceView for Actor {
    const HEADINGS: &'static [&'static str] = &["Name"];

    fn cells(&self, _choices: &FormChoices) -> Vec<Cell> {
        vec![Cell::text(self.full_name())]
    }

    fn details(&self, _choices: &FormChoices) -> Vec<(&'static str, Cell)> {
        person_details(
            &self.first_name,
            self.middle_name.as_deref(),
            &self.last_name,
            self.suffix.as_deref(),
        )
    }
}

fn person_details(
    first: &str,
    middle: Option<&str>,
    last: &str,
    suffix: Option<&str>,
) -> Vec<(&'static str, Cell)> {
    vec![
        ("First Name", Cell::text(first)),
        ("Middle Name", Cell::optional(middle)),
        ("Last Name", Cell::text(last)),
        ("Suffix", Cell::optional(suffix)),
    ]
}

impl ResourceView for Character {
    const HEADINGS: &'static [&'static str] = &["Name", "Series", "Alias Of"];

    fn cells(&self, choices: &FormChoices) -> Vec<Cell> {
        vec![
            Cell::text(self.full_name()),
            Cell::link_to(ResourceKind::Series, Some(self.series_id), &choices.series),
            Cell::link_to(ResourceKind::Character, self.parent_id, &choices.characters),
        ]
    }

    fn details(&self, choices: &FormChoices) -> Vec<(&'static str, Cell)> {
        vec![
            ("First Name", Cell::text(&self.first_name)),
            ("Last Name", Cell::text(&self.last_name)),
            ("Suffix", Cell::optional(self.suffix.as_deref())),
            (
                "Universe",
                Cell::link_to(ResourceKind::Universe, self.universe_id, &choices.universes),
            ),
            (
                "Series",
                Cell::link_to(ResourceKind::Series, Some(self.series_id), &choices.series),
            ),
            (
                "Alias Of",
                Cell::link_to(ResourceKind::Character, self.parent_id, &choices.characters),
            ),
            ("Description", Cell::optional(self.description.as_deref())),
        ]
    }
}

impl ResourceView for Art {
    const HEADINGS: &'static [&'static str] = &["Title", "Artist", "Source"];

    fn cells(&self, _choices: &FormChoices) -> Vec<Cell> {
        vec![
            Cell::text(&self.title),
            Cell::text(&self.artist),
            Cell::text(&self.source),
        ]
    }

    fn details(&self, _choices: &FormChoices) -> Vec<(&'static str, Cell)> {
        vec![
            ("Title", Cell::text(&self.title)),
            ("Artist", Cell::text(&self.artist)),
            ("Source", Cell::text(&self.source)),
            ("Description", Cell::optional(self.description.as_deref())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use library_db::models::choice::Choice;

    use super::*;

    #[test]
    fn book_form_lists_author_choices_twice() {
        let choices = FormChoices {
            authors: vec![Choice {
                id: 1,
                label: "Brandon Sanderson".into(),
            }],
            ..Default::default()
        };
        let form = BookForm {
            title: "Elantris".into(),
            author_id: Some(1),
            ..Default::default()
        };
        let fields = form.fields(&choices);
        let names: Vec<&str> = fields.iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            [
                "universe_id",
                "series_id",
                "author_id",
                "coauthor_id",
                "title",
                "series_index"
            ]
        );
        assert_eq!(fields[2].value, "1");
        assert_eq!(fields[3].value, "");
    }

    #[test]
    fn person_form_echoes_optional_fields_as_blank() {
        let form = PersonForm {
            first_name: "Brandon".into(),
            last_name: "Sanderson".into(),
            ..Default::default()
        };
        let choices = FormChoices::default();
        let fields = form.fields(&choices);
        assert_eq!(fields[1].name, "middle_name");
        assert_eq!(fields[1].value, "");
    }
}
