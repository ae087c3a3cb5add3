//! List and detail pages for catalogue resources.

use library_core::resource::ResourceKind;
use library_core::types::DbId;
use library_db::models::choice::{Choice, FormChoices};
use library_db::resource::Resource;

use super::escape;
use super::forms::FormView;

/// One table cell or detail value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Link { href: String, text: String },
    Empty,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn optional(value: Option<&str>) -> Self {
        value.map_or(Cell::Empty, Cell::text)
    }

    pub fn number(value: Option<i32>) -> Self {
        value.map_or(Cell::Empty, |n| Cell::Text(n.to_string()))
    }

    /// Link to row `id` of `kind`, labelled from `choices`.
    pub fn link_to(kind: ResourceKind, id: Option<DbId>, choices: &[Choice]) -> Self {
        let Some(id) = id else {
            return Cell::Empty;
        };
        let text = choices
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.label.clone())
            .unwrap_or_else(|| format!("#{id}"));
        Cell::Link {
            href: format!("/{}/{id}", kind.slug()),
            text,
        }
    }

    fn render(&self) -> String {
        match self {
            Cell::Text(text) => escape(text),
            Cell::Link { href, text } => {
                format!(r#"<a href="{}">{}</a>"#, escape(href), escape(text))
            }
            Cell::Empty => String::new(),
        }
    }
}

/// How a resource shows up on its list and detail pages.
pub trait ResourceView: Resource<Form: FormView> {
    /// Column headings of the list table.
    const HEADINGS: &'static [&'static str];

    /// One list row, matching [`ResourceView::HEADINGS`].
    fn cells(&self, choices: &FormChoices) -> Vec<Cell>;

    /// Labelled values for the detail page.
    fn details(&self, choices: &FormChoices) -> Vec<(&'static str, Cell)>;
}

/// The list page body: an add link and one clickable row per entry.
pub fn render_list<R: ResourceView>(rows: &[R], choices: &FormChoices) -> String {
    let slug = R::KIND.slug();
    let headings: String = R::HEADINGS
        .iter()
        .map(|h| format!("<th>{}</th>", escape(h)))
        .collect();

    let body: String = rows
        .iter()
        .map(|row| {
            let cells: String = row
                .cells(choices)
                .iter()
                .map(|cell| format!("<td>{}</td>", cell.render()))
                .collect();
            format!(
                r#"<tr><td><a href="/{slug}/{id}">{id}</a></td>{cells}</tr>"#,
                id = row.id()
            )
        })
        .collect::<Vec<_>>()
        .join("\n            ");

    let empty = if rows.is_empty() {
        format!(
            "<p>No {} yet.</p>",
            R::KIND.plural_label().to_lowercase()
        )
    } else {
        String::new()
    };

    format!(
        r#"<p><a href="/{slug}/add">Add {label}</a></p>
        {empty}
        <table>
            <tr><th>#</th>{headings}</tr>
            {body}
        </table>"#,
        label = escape(R::KIND.label()),
    )
}

/// The detail page body.
pub fn render_detail<R: ResourceView>(row: &R, choices: &FormChoices, extra: &str) -> String {
    let slug = R::KIND.slug();
    let id = row.id();
    let items: String = row
        .details(choices)
        .iter()
        .map(|(label, cell)| format!("<dt>{}</dt><dd>{}</dd>", escape(label), cell.render()))
        .collect::<Vec<_>>()
        .join("\n            ");

    format!(
        r#"<dl>
            {items}
        </dl>
        {extra}
        <p><a href="/{slug}/{id}/edit">Edit</a> <a href="/{slug}">Back to list</a></p>"#
    )
}

/// A titled bullet list of links, for related rows on a detail page.
pub fn render_related(title: &str, items: &[Cell]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let entries: String = items
        .iter()
        .map(|cell| format!("<li>{}</li>", cell.render()))
        .collect();
    format!("<h2>{}</h2><ul>{entries}</ul>", escape(title))
}

/// One detail-page link per row.
pub fn row_links<R: Resource>(rows: &[R]) -> Vec<Cell> {
    rows.iter()
        .map(|row| Cell::Link {
            href: format!("/{}/{}", R::KIND.slug(), row.id()),
            text: row.display_name(),
        })
        .collect()
}
